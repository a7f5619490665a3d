//! Permission gate sequencing.

use crate::handlers::core::{Caller, PermissionGate};
use tracing::debug;

/// First permission the caller fails, in declaration order.
///
/// Stops asking the gate after the first denial.
pub fn first_denied<'p>(
    gate: &dyn PermissionGate,
    caller: &dyn Caller,
    permissions: &'p [String],
) -> Option<&'p str> {
    let denied = permissions
        .iter()
        .map(String::as_str)
        .find(|permission| !gate.check(caller, permission));
    if let Some(permission) = denied {
        debug!(caller = %caller.name(), permission = %permission, "Permission denied");
    }
    denied
}
