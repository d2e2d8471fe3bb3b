//! In-memory stand-in for an Acme window.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::infra::acme::{Window, WindowSystem};

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

/// Behaves like an Acme window: the address register is reset to `#0,#0`
/// the first time addr is opened, and `addr=dot` copies dot into it.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindow {
    pub tag: Vec<u8>,
    pub body: Vec<u8>,
    pub dot: (usize, usize),
    pub addr: (usize, usize),
    pub addr_open: bool,
    pub addr_reads: usize,
    /// Fail the n-th addr read, counting from 1.
    pub fail_addr_read: Option<usize>,
    pub fail_ctl: bool,
    pub fail_body: bool,
    pub fail_tag: bool,
    pub log: Log,
}

impl FakeWindow {
    pub fn new(tag: &str, body: &str, dot: (usize, usize)) -> Self {
        Self {
            tag: tag.as_bytes().to_vec(),
            body: body.as_bytes().to_vec(),
            dot,
            addr: (7, 7),
            addr_open: false,
            addr_reads: 0,
            fail_addr_read: None,
            fail_ctl: false,
            fail_body: false,
            fail_tag: false,
            log: Log::default(),
        }
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }
}

impl Window for FakeWindow {
    fn read_tag(&mut self) -> io::Result<Vec<u8>> {
        self.record("read tag");
        if self.fail_tag {
            return Err(io::Error::other("tag unreadable"));
        }
        Ok(self.tag.clone())
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        self.record("read body");
        if self.fail_body {
            return Err(io::Error::other("body unreadable"));
        }
        Ok(self.body.clone())
    }

    fn read_addr(&mut self) -> io::Result<(usize, usize)> {
        self.record("read addr");
        self.addr_reads += 1;
        if self.fail_addr_read == Some(self.addr_reads) {
            return Err(io::Error::other("addr unreadable"));
        }
        if !self.addr_open {
            self.addr_open = true;
            self.addr = (0, 0);
        }
        Ok(self.addr)
    }

    fn ctl(&mut self, message: &str) -> io::Result<()> {
        self.record(format!("ctl {message}"));
        if self.fail_ctl {
            return Err(io::Error::other("ctl refused"));
        }
        if message == "addr=dot" {
            self.addr = self.dot;
        }
        Ok(())
    }
}

impl Drop for FakeWindow {
    fn drop(&mut self) {
        self.record("close");
    }
}

/// Hands out a copy of one window for a single id.
#[derive(Debug, Default)]
pub(crate) struct FakeAcme {
    pub id: u32,
    pub window: FakeWindow,
}

impl WindowSystem for FakeAcme {
    type Window = FakeWindow;

    fn open(&self, id: u32) -> io::Result<FakeWindow> {
        if id != self.id {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such window"));
        }
        Ok(self.window.clone())
    }
}
