//! Reading dot from a window.

use crate::domain::errors::GuruError;
use crate::domain::model::SelectionRange;
use crate::infra::acme::Window;

/// Ask the window for its current selection, in runes.
///
/// The first addr read only opens the address file. Acme resets the
/// address when that file is first opened, so setting `addr=dot` before it
/// is open would be lost.
pub fn read_dot<W: Window>(window: &mut W) -> Result<SelectionRange, GuruError> {
    window
        .read_addr()
        .map_err(|err| GuruError::address("opening addr", err))?;
    window
        .ctl("addr=dot")
        .map_err(|err| GuruError::address("setting addr=dot", err))?;
    let (q0, q1) = window
        .read_addr()
        .map_err(|err| GuruError::address("reading dot", err))?;

    tracing::debug!(q0, q1, "read selection");
    SelectionRange::new(q0, q1)
}
