//! Argument validation for the SQL functions
//!
//! Rules:
//! - Reject calls with an unsupported argument count
//! - `size` must be a positive integer number of bytes
//! - `seed` must be an integer
//! - A serialized filter must be a blob (or NULL)

use tracing::warn;

use crate::domain::Value;
use crate::error::FunctionError;

/// Check that `args.len()` is one of `allowed`
pub fn check_arity(
    name: &str,
    usage: &'static str,
    args: &[Value],
    allowed: &[usize],
) -> Result<(), FunctionError> {
    if allowed.contains(&args.len()) {
        return Ok(());
    }

    warn!(
        function = name,
        actual = args.len(),
        "Rejected call with wrong argument count"
    );
    Err(FunctionError::WrongArgumentCount {
        name: name.to_string(),
        usage,
        actual: args.len(),
    })
}

/// Parse the optional filter size argument of `bloomfilter`, in bytes
pub fn size_bytes(name: &str, value: &Value) -> Result<u64, FunctionError> {
    let size = value.as_integer().ok_or_else(|| {
        invalid(
            name,
            format!("size must be an integer, got {}", value.type_name()),
        )
    })?;

    u64::try_from(size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| invalid(name, format!("size must be positive, got {}", size)))
}

/// Parse the optional seed argument of `murmurhash`
///
/// The seed is truncated to its low 32 bits.
pub fn seed(name: &str, value: &Value) -> Result<u32, FunctionError> {
    value
        .as_integer()
        .map(|seed| seed as u32)
        .ok_or_else(|| invalid(name, "Seed must be an integer".to_string()))
}

/// Borrow the serialized filter argument, `None` for NULL
pub fn filter_blob<'a>(name: &str, value: &'a Value) -> Result<Option<&'a [u8]>, FunctionError> {
    match value {
        Value::Null => Ok(None),
        Value::Blob(bytes) => Ok(Some(bytes)),
        other => Err(invalid(
            name,
            format!("filter must be a blob, got {}", other.type_name()),
        )),
    }
}

fn invalid(name: &str, message: String) -> FunctionError {
    warn!(function = name, %message, "Rejected function argument");
    FunctionError::InvalidArgument {
        name: name.to_string(),
        message,
    }
}
