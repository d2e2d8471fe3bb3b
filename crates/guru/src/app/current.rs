//! Snapshotting the window Guru was run from.

use std::io;

use crate::app::selection::read_dot;
use crate::domain::errors::GuruError;
use crate::domain::model::BufferSnapshot;
use crate::domain::tag;
use crate::infra::acme::{Window, WindowSystem, open_current};

/// Read name, body, and byte-addressed dot of the current window.
///
/// `winid` is the value of environment variable `window_env`. The window is
/// closed before the selection is converted, whether or not reading succeeded.
pub fn snapshot<S: WindowSystem>(
    system: &S,
    window_env: &str,
    winid: Option<&str>,
) -> Result<BufferSnapshot, GuruError> {
    let mut window = open_current(system, window_env, winid)?;

    let body = window
        .read_body()
        .map_err(|err| GuruError::io("window body", err))?;
    let name = filename(&mut window)?;
    let selection = read_dot(&mut window)?;
    drop(window);

    BufferSnapshot::from_runes(name, body, selection)
}

fn filename<W: Window>(window: &mut W) -> Result<String, GuruError> {
    let raw = window
        .read_tag()
        .map_err(|err| GuruError::io("window tag", err))?;
    let tag = String::from_utf8(raw).map_err(|err| {
        GuruError::io("window tag", io::Error::new(io::ErrorKind::InvalidData, err))
    })?;
    Ok(tag::filename(&tag)?.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{FakeAcme, FakeWindow};

    fn acme(tag: &str, body: &str, dot: (usize, usize)) -> FakeAcme {
        FakeAcme {
            id: 4,
            window: FakeWindow::new(tag, body, dot),
        }
    }

    #[test]
    fn snapshots_name_body_and_byte_range() -> anyhow::Result<()> {
        let acme = acme("/src/日本.go Del Snarf Get", "日本語def", (1, 5));
        let snapshot = snapshot(&acme, "winid", Some("4"))?;

        assert_eq!(snapshot.name(), "/src/日本.go");
        assert_eq!(snapshot.body(), "日本語def".as_bytes());
        assert_eq!(snapshot.byte_range(), (3, 11));
        Ok(())
    }

    #[test]
    fn reads_in_order_and_closes_window() -> anyhow::Result<()> {
        let acme = acme("a.go Del", "abc", (0, 3));
        let log = acme.window.log.clone();
        snapshot(&acme, "winid", Some("4"))?;

        assert_eq!(
            *log.borrow(),
            vec![
                "read body",
                "read tag",
                "read addr",
                "ctl addr=dot",
                "read addr",
                "close"
            ]
        );
        Ok(())
    }

    #[test]
    fn window_is_closed_on_failure() {
        let mut acme = acme("a.go", "abc", (0, 1));
        acme.window.fail_body = true;
        let log = acme.window.log.clone();

        let err = snapshot(&acme, "winid", Some("4")).unwrap_err();
        assert!(matches!(err, GuruError::Io { what: "window body", .. }));
        assert_eq!(log.borrow().last().map(String::as_str), Some("close"));
    }

    #[test]
    fn tag_read_failure_is_io_error() {
        let mut acme = acme("a.go Del", "abc", (0, 1));
        acme.window.fail_tag = true;
        let log = acme.window.log.clone();

        let err = snapshot(&acme, "winid", Some("4")).unwrap_err();
        assert!(matches!(err, GuruError::Io { what: "window tag", .. }));
        assert_eq!(log.borrow().last().map(String::as_str), Some("close"));
    }

    #[test]
    fn non_utf8_tag_is_io_error() {
        let mut acme = acme("", "abc", (0, 1));
        acme.window.tag = b"\xff.go Del".to_vec();

        let err = snapshot(&acme, "winid", Some("4")).unwrap_err();
        match err {
            GuruError::Io { what, source } => {
                assert_eq!(what, "window tag");
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_tag_is_reported() {
        let acme = acme("a.go", "abc", (0, 1));
        let err = snapshot(&acme, "winid", Some("4")).unwrap_err();
        assert!(matches!(err, GuruError::MalformedTag));
    }

    #[test]
    fn bad_window_ids() {
        let acme = acme("a.go Del", "abc", (0, 1));
        assert!(matches!(
            snapshot(&acme, "winid", None),
            Err(GuruError::InvalidWindowId { .. })
        ));
        assert!(matches!(
            snapshot(&acme, "winid", Some("5")),
            Err(GuruError::WindowOpen { id: 5, .. })
        ));
    }

    #[test]
    fn dot_past_body_is_out_of_range() {
        let acme = acme("a.go Del", "abc", (1, 8));
        let err = snapshot(&acme, "winid", Some("4")).unwrap_err();
        assert!(matches!(err, GuruError::OffsetOutOfRange { requested: 8, .. }));
    }
}
