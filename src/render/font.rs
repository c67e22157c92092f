//! Font selection for the renderer
//!
//! Tries each configured candidate in order: an existing path is loaded
//! directly, a bare file name is searched for under the platform font
//! directories. When no candidate yields a usable TrueType/TTC font the
//! renderer falls back to a built-in 5x7 bitmap font, so rasterization always
//! has something to draw with. The built-in font covers printable ASCII;
//! anything else renders as a hollow box.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Glyph columns in the built-in font.
pub const BUILTIN_GLYPH_COLS: usize = 5;

/// Glyph rows in the built-in font.
pub const BUILTIN_GLYPH_ROWS: usize = 7;

/// A font the renderer can draw with.
pub enum LoadedFont {
    /// Outline font loaded from a candidate file.
    Truetype(FontVec),
    /// Built-in 5x7 bitmap font, used when every candidate fails.
    Builtin,
}

/// Resolve and load the first usable font candidate.
pub fn load_font(candidates: &[String]) -> LoadedFont {
    for candidate in candidates {
        let Some(path) = resolve_candidate(candidate) else {
            debug!(font = %candidate, "Font candidate not found");
            continue;
        };
        match load_truetype(&path) {
            Some(font) => {
                debug!(font = %path.display(), "Loaded font");
                return LoadedFont::Truetype(font);
            }
            None => {
                warn!(font = %path.display(), "Failed to load font candidate, trying next");
            }
        }
    }

    if !candidates.is_empty() {
        warn!("No font candidate usable, falling back to built-in font");
    }
    LoadedFont::Builtin
}

/// Turn a candidate into an on-disk path: existing paths are used as-is,
/// bare names are searched under the platform font directories.
fn resolve_candidate(candidate: &str) -> Option<PathBuf> {
    let as_path = Path::new(candidate);
    if as_path.is_file() {
        return Some(as_path.to_path_buf());
    }
    if as_path.components().count() > 1 {
        // A path that does not exist; searching font dirs for it makes no sense.
        return None;
    }

    for dir in system_font_dirs() {
        for entry in WalkDir::new(&dir).max_depth(4).into_iter().flatten() {
            if entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .eq_ignore_ascii_case(candidate)
            {
                return Some(entry.into_path());
            }
        }
    }
    None
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs_out = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = dirs::home_dir() {
        dirs_out.push(home.join(".fonts"));
        dirs_out.push(home.join(".local").join("share").join("fonts"));
    }
    dirs_out
}

fn load_truetype(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    // Index 0 selects the first face of a .ttc collection; plain .ttf files
    // have exactly one.
    FontVec::try_from_vec_and_index(data, 0).ok()
}

/// Column bitmap for a printable ASCII character in the built-in font.
///
/// Each byte is one column, bit 0 at the top. Returns `None` outside
/// `0x20..=0x7E`; callers draw a hollow box for those.
pub fn builtin_glyph(ch: char) -> Option<&'static [u8; BUILTIN_GLYPH_COLS]> {
    let code = ch as u32;
    if !(0x20..=0x7E).contains(&code) {
        return None;
    }
    Some(&FONT_5X7[(code - 0x20) as usize])
}

/// Classic 5x7 column-major ASCII font, 0x20..=0x7E.
#[rustfmt::skip]
const FONT_5X7: [[u8; BUILTIN_GLYPH_COLS]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x41, 0x22, 0x14, 0x08, 0x00], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x32], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x00, 0x7F, 0x41, 0x41], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x00, 0x7F, 0x10, 0x28, 0x44], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_font_empty_candidates_uses_builtin() {
        assert!(matches!(load_font(&[]), LoadedFont::Builtin));
    }

    #[test]
    fn test_load_font_bogus_candidates_uses_builtin() {
        let candidates = vec![
            "definitely-not-a-real-font.ttf".to_string(),
            "/nonexistent/path/font.ttc".to_string(),
        ];
        assert!(matches!(load_font(&candidates), LoadedFont::Builtin));
    }

    #[test]
    fn test_load_font_rejects_non_font_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fake.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();
        let candidates = vec![path.to_string_lossy().to_string()];
        assert!(matches!(load_font(&candidates), LoadedFont::Builtin));
    }

    #[test]
    fn test_builtin_glyph_ascii_coverage() {
        for code in 0x20u8..=0x7E {
            assert!(builtin_glyph(code as char).is_some(), "missing {}", code);
        }
    }

    #[test]
    fn test_builtin_glyph_non_ascii() {
        assert!(builtin_glyph('番').is_none());
        assert!(builtin_glyph('📋').is_none());
        assert!(builtin_glyph('\n').is_none());
    }

    #[test]
    fn test_builtin_glyph_space_is_blank() {
        let space = builtin_glyph(' ').unwrap();
        assert!(space.iter().all(|col| *col == 0));
    }
}
