use std::{collections::HashMap, path::Path, sync::Arc};

use crate::error::{Error, Result};

/// Font database plus a cache of parsed faces.
///
/// `fontdb` knows which faces exist on the system (or were loaded from files),
/// while parsing a face into a `fontdue::Font` only happens the first time it
/// is requested.
pub struct FontStorage {
    font_db: fontdb::Database,
    /// Parsed faces. Not every face in `font_db` ends up here.
    loaded_font: HashMap<fontdb::ID, Arc<fontdue::Font>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Populating the database.
impl FontStorage {
    /// Loads the fonts installed on this machine.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
        log::debug!("Loaded {} system font faces", self.font_db.len());
    }

    /// Loads a font file. Collections register every face they contain.
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.font_db.load_font_file(path)?;
        Ok(())
    }

    /// Loads a font from memory.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Sets the family used for the generic serif fallback.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
    }

    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    pub fn len(&self) -> usize {
        self.font_db.len()
    }
}

/// Resolving faces.
impl FontStorage {
    /// Finds a regular-weight face for `family`.
    ///
    /// Falls back to the generic serif family and then to the first loaded
    /// face, which mirrors how a browser canvas degrades a missing font.
    pub fn query_family(&mut self, family: &str) -> Result<(fontdb::ID, Arc<fontdue::Font>)> {
        let families = [fontdb::Family::Name(family), fontdb::Family::Serif];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = match self.font_db.query(&query) {
            Some(id) => id,
            None => {
                let Some(face) = self.font_db.faces().next() else {
                    return Err(Error::FontNotFound(family.to_string()));
                };
                log::warn!(
                    "No face matches '{}', falling back to '{}'",
                    family,
                    face.post_script_name
                );
                face.id
            }
        };

        let font = self.font(id)?;
        Ok((id, font))
    }

    /// Returns the parsed face for `id`, parsing it on first use.
    pub fn font(&mut self, id: fontdb::ID) -> Result<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let parsed = self
                    .font_db
                    .with_face_data(id, |data, index| {
                        fontdue::Font::from_bytes(
                            data,
                            fontdue::FontSettings {
                                collection_index: index,
                                scale: 40.0,
                                load_substitutions: true,
                            },
                        )
                    })
                    .ok_or_else(|| Error::FontLoad(format!("face {id:?} is not in the database")))?;

                match parsed {
                    Ok(font) => Ok(Arc::clone(entry.insert(Arc::new(font)))),
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        Err(Error::FontLoad(e.to_string()))
                    }
                }
            }
        }
    }
}
