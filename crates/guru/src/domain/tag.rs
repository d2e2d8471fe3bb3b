//! Window tag parsing.

use crate::domain::errors::GuruError;

/// File name of a window: everything in the tag before the first space.
pub fn filename(tag: &str) -> Result<&str, GuruError> {
    tag.find(' ')
        .map(|end| &tag[..end])
        .ok_or(GuruError::MalformedTag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_path_before_first_space() {
        let name = filename("/path/to/file.go Del Snarf Get").unwrap();
        assert_eq!(name, "/path/to/file.go");
    }

    #[test]
    fn keeps_trailing_tag_text_out() {
        let name = filename("/src/a.go Del Snarf Undo | Look Guru describe").unwrap();
        assert_eq!(name, "/src/a.go");
    }

    #[test]
    fn tag_without_space_is_malformed() {
        assert!(matches!(
            filename("/path/to/file.go"),
            Err(GuruError::MalformedTag)
        ));
    }

    #[test]
    fn leading_space_yields_empty_name() {
        assert_eq!(filename(" Del Snarf").unwrap(), "");
    }
}
