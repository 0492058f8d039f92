//! System font lookup for text rendering.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::sync::OnceLock;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// The sans-serif face used for text labels, loaded once.
///
/// Returns `None` on systems with no usable fonts; callers skip text
/// rendering in that case rather than failing the frame.
pub fn sans_serif() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_sans_serif).as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let query = Query {
        families: &[Family::SansSerif],
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    let font = match &face.source {
        fontdb::Source::File(path) => Font::try_from_vec(std::fs::read(path).ok()?),
        fontdb::Source::SharedFile(path, _) => Font::try_from_vec(std::fs::read(path).ok()?),
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    };
    if font.is_none() {
        log::warn!("failed to load sans-serif face; text labels will not render");
    }
    font
}
