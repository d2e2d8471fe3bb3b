//! Access to Acme windows through the editor's file server.
//!
//! Acme serves each window as a directory `<mount>/<id>/` holding `tag`,
//! `body`, `addr`, and `ctl` files. On Plan 9 the server lives at
//! `/mnt/acme`; under plan9port it can be mounted with `9pfuse`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::domain::errors::GuruError;

/// Operations Guru needs from an open editor window.
pub trait Window {
    fn read_tag(&mut self) -> io::Result<Vec<u8>>;
    fn read_body(&mut self) -> io::Result<Vec<u8>>;
    /// Current contents of the window's address register, in runes.
    fn read_addr(&mut self) -> io::Result<(usize, usize)>;
    fn ctl(&mut self, message: &str) -> io::Result<()>;
}

/// Something that can hand out windows by numeric id.
pub trait WindowSystem {
    type Window: Window;

    fn open(&self, id: u32) -> io::Result<Self::Window>;
}

/// Parse the window id found in environment variable `var`.
pub fn window_id(var: &str, value: Option<&str>) -> Result<u32, GuruError> {
    value
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| GuruError::InvalidWindowId {
            var: var.to_owned(),
            value: value.map(str::to_owned),
        })
}

/// Open the window Acme told us about through `$var`.
pub fn open_current<S: WindowSystem>(
    system: &S,
    var: &str,
    value: Option<&str>,
) -> Result<S::Window, GuruError> {
    let id = window_id(var, value)?;
    let window = system
        .open(id)
        .map_err(|source| GuruError::WindowOpen { id, source })?;
    tracing::debug!(id, "opened acme window");
    Ok(window)
}

/// Window system backed by a mounted Acme file server.
#[derive(Debug, Clone)]
pub struct AcmeFs {
    mount: PathBuf,
}

impl AcmeFs {
    pub fn new(mount: impl Into<PathBuf>) -> Self {
        Self {
            mount: mount.into(),
        }
    }
}

impl WindowSystem for AcmeFs {
    type Window = FsWindow;

    fn open(&self, id: u32) -> io::Result<FsWindow> {
        let dir = self.mount.join(id.to_string());
        let ctl = OpenOptions::new()
            .read(true)
            .write(true)
            .open(dir.join("ctl"))?;
        Ok(FsWindow {
            id,
            dir,
            ctl,
            addr: None,
        })
    }
}

/// An open window directory. Dropping it closes every window file.
#[derive(Debug)]
pub struct FsWindow {
    id: u32,
    dir: PathBuf,
    ctl: File,
    // Acme resets the address whenever addr goes from no open fids to one,
    // so it stays open once touched.
    addr: Option<File>,
}

impl FsWindow {
    pub fn id(&self) -> u32 {
        self.id
    }

    fn addr_file(&mut self) -> io::Result<&mut File> {
        let file = match self.addr.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .read(true)
                .write(true)
                .open(self.dir.join("addr"))?,
        };
        Ok(self.addr.insert(file))
    }
}

impl Window for FsWindow {
    fn read_tag(&mut self) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join("tag"))
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join("body"))
    }

    fn read_addr(&mut self) -> io::Result<(usize, usize)> {
        let file = self.addr_file()?;
        file.seek(SeekFrom::Start(0))?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        parse_addr(&text)
    }

    fn ctl(&mut self, message: &str) -> io::Result<()> {
        self.ctl.write_all(format!("{message}\n").as_bytes())
    }
}

impl Drop for FsWindow {
    fn drop(&mut self) {
        tracing::trace!(id = self.id, "closing acme window files");
    }
}

/// Parse the `q0 q1` pair Acme writes to an addr file.
pub fn parse_addr(text: &str) -> io::Result<(usize, usize)> {
    let mut fields = text.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(q0)), Some(Ok(q1)), None) => Ok((q0, q1)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed address {text:?}"),
        )),
    }
}
