//! System font lookup for chart text.
//!
//! plotters draws text through faces registered by name. Faces are found with `fontdb` and
//! registered once per family for the life of the process.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use plotters::style::FontStyle;

/// Generic family every figure falls back to.
pub const SANS_SERIF: &str = "sans-serif";

struct FontBook {
    db: fontdb::Database,
    families: HashMap<String, bool>,
}

static FONT_BOOK: OnceLock<Mutex<FontBook>> = OnceLock::new();

impl FontBook {
    fn load() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        if db.is_empty() {
            tracing::warn!("no system fonts found; frames are drawn without text");
        }
        Self {
            db,
            families: HashMap::new(),
        }
    }

    fn ensure(&mut self, name: &str) -> bool {
        if let Some(ok) = self.families.get(name) {
            return *ok;
        }
        let ok = self.register(name);
        self.families.insert(name.to_string(), ok);
        ok
    }

    fn register(&self, name: &str) -> bool {
        let family = match name {
            SANS_SERIF => fontdb::Family::SansSerif,
            "serif" => fontdb::Family::Serif,
            "monospace" => fontdb::Family::Monospace,
            other => fontdb::Family::Name(other),
        };
        let query = fontdb::Query {
            families: &[family],
            ..fontdb::Query::default()
        };
        let mut id = self.db.query(&query);
        if id.is_none() && name == SANS_SERIF {
            id = self.db.faces().find(|f| f.index == 0).map(|f| f.id);
        }
        let Some(id) = id else {
            tracing::debug!(family = name, "no matching font face");
            return false;
        };
        let Some(bytes) = self.db.with_face_data(id, |data, _| data.to_vec()) else {
            return false;
        };

        // Registered faces must outlive every chart; each family is leaked at most once.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font(name, FontStyle::Normal, bytes) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(family = name, "font face could not be registered");
                false
            }
        }
    }
}

/// Family name to draw text in `requested` with, or `None` when no usable face exists.
///
/// An unknown family falls back to [`SANS_SERIF`]. Without any face, figures are drawn
/// without text.
pub fn resolve_family(requested: &str) -> Option<String> {
    let book = FONT_BOOK.get_or_init(|| Mutex::new(FontBook::load()));
    let mut book = book.lock().ok()?;
    if book.ensure(requested) {
        return Some(requested.to_string());
    }
    if requested != SANS_SERIF && book.ensure(SANS_SERIF) {
        tracing::debug!(family = requested, "falling back to sans-serif");
        return Some(SANS_SERIF.to_string());
    }
    None
}
