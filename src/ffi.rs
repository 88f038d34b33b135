//! Foreign Function Interface (FFI) for C/C++ interoperability
//!
//! One entry point per numeric kind, each with a variant that takes parallel
//! arrays of variable names and values. Nothing is allocated across the
//! boundary: the value is written through an out pointer and the status,
//! including any error message, is returned by value.
//!
//! # Example Usage
//!
//! ```c
//! int32_t value;
//! RpnStatus status = rpn_eval_i32("(2+3)*4", &value);
//! if (status.status == 0) {
//!     printf("%d\n", value);
//! } else {
//!     printf("error %d at %d: %s\n", status.status, status.position, status.error);
//! }
//!
//! const char* names[] = { "x", "y" };
//! double values[] = { 1.5, 2.0 };
//! double result;
//! rpn_eval_f64_with_variables("x * y - 1", names, values, 2, &result);
//! ```
//!
//! # Status codes
//!
//! `0` is success, positive codes are [`EvalError::error_code`] values and
//! negative codes are FFI faults ([`FFI_ERROR_NULL_POINTER`],
//! [`FFI_ERROR_INVALID_UTF8`]). On any failure `*out` is set to zero.

extern crate alloc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::ffi::{CStr, c_char};

use crate::context::{NoVariables, Variables};
use crate::engine::eval_with;
use crate::error::EvalError;
use crate::numeric::Numeric;

/// Size of the error message buffer in [`RpnStatus`], including the
/// terminating NUL.
pub const RPN_ERROR_BUFFER_SIZE: usize = 128;

/// FFI error codes (negative to distinguish from EvalError codes)
pub const FFI_ERROR_NULL_POINTER: i32 = -1;
pub const FFI_ERROR_INVALID_UTF8: i32 = -2;

/// Status of an FFI evaluation
#[repr(C)]
pub struct RpnStatus {
    /// Error code: 0 for success, positive for EvalError, negative for FFI errors
    pub status: i32,
    /// Char position of the failing token, or -1 when there is none
    pub position: i32,
    /// Error message (empty string on success, no freeing needed)
    pub error: [c_char; RPN_ERROR_BUFFER_SIZE],
}

impl RpnStatus {
    /// Helper function to copy a string to the error buffer
    fn copy_to_error_buffer(msg: &str) -> [c_char; RPN_ERROR_BUFFER_SIZE] {
        let mut buffer = [0; RPN_ERROR_BUFFER_SIZE];
        let bytes = msg.as_bytes();
        let copy_len = core::cmp::min(bytes.len(), RPN_ERROR_BUFFER_SIZE - 1);

        for (slot, &byte) in buffer.iter_mut().zip(&bytes[..copy_len]) {
            *slot = byte as c_char;
        }
        buffer
    }

    fn success() -> Self {
        RpnStatus {
            status: 0,
            position: -1,
            error: [0; RPN_ERROR_BUFFER_SIZE],
        }
    }

    fn from_eval_error(err: &EvalError) -> Self {
        let position = err
            .position()
            .and_then(|p| i32::try_from(p).ok())
            .unwrap_or(-1);
        RpnStatus {
            status: err.error_code(),
            position,
            error: Self::copy_to_error_buffer(&err.to_string()),
        }
    }

    fn from_ffi_error(code: i32, msg: &str) -> Self {
        RpnStatus {
            status: code,
            position: -1,
            error: Self::copy_to_error_buffer(msg),
        }
    }
}

/// Borrows a C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn borrow_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, RpnStatus> {
    if ptr.is_null() {
        return Err(RpnStatus::from_ffi_error(FFI_ERROR_NULL_POINTER, what));
    }
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str()
        .map_err(|_| RpnStatus::from_ffi_error(FFI_ERROR_INVALID_UTF8, "Invalid UTF-8 in input"))
}

/// Pairs up `count` names and values.
///
/// # Safety
/// Both arrays must hold at least `count` elements when `count > 0`.
unsafe fn collect_variables<'a, T: Numeric>(
    names: *const *const c_char,
    values: *const T,
    count: usize,
) -> Result<Vec<(&'a str, T)>, RpnStatus> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if names.is_null() || values.is_null() {
        return Err(RpnStatus::from_ffi_error(
            FFI_ERROR_NULL_POINTER,
            "Null variable array",
        ));
    }

    let names = unsafe { core::slice::from_raw_parts(names, count) };
    let values = unsafe { core::slice::from_raw_parts(values, count) };
    let mut pairs = Vec::with_capacity(count);
    for (&name, &value) in names.iter().zip(values) {
        let name = unsafe { borrow_str(name, "Null variable name")? };
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// Shared body of every entry point.
///
/// # Safety
/// Pointer requirements are those of the calling `rpn_eval_*` function.
unsafe fn eval_into<T, V>(expression: *const c_char, variables: &V, out: *mut T) -> RpnStatus
where
    T: Numeric,
    V: Variables<T> + ?Sized,
{
    if out.is_null() {
        return RpnStatus::from_ffi_error(FFI_ERROR_NULL_POINTER, "Null output pointer");
    }
    let expression = match unsafe { borrow_str(expression, "Null expression") } {
        Ok(expression) => expression,
        Err(status) => {
            unsafe { out.write(T::default()) };
            return status;
        }
    };

    let (value, status) = match eval_with::<T, V>(expression, variables) {
        Ok(value) => (value, RpnStatus::success()),
        Err(err) => (T::default(), RpnStatus::from_eval_error(&err)),
    };
    unsafe { out.write(value) };
    status
}

/// # Safety
/// Pointer requirements are those of the calling `rpn_eval_*_with_variables`
/// function.
unsafe fn eval_with_arrays<T: Numeric>(
    expression: *const c_char,
    names: *const *const c_char,
    values: *const T,
    count: usize,
    out: *mut T,
) -> RpnStatus {
    match unsafe { collect_variables(names, values, count) } {
        Ok(pairs) => unsafe { eval_into(expression, pairs.as_slice(), out) },
        Err(status) => {
            if !out.is_null() {
                unsafe { out.write(T::default()) };
            }
            status
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate an expression with 32-bit integer arithmetic
///
/// # Parameters
/// - `expression`: NUL-terminated UTF-8 expression
/// - `out`: Receives the result, or 0 on failure
///
/// # Returns
/// Status with `status == 0` on success
///
/// # Safety
/// `expression` must be a valid C string and `out` a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_i32(expression: *const c_char, out: *mut i32) -> RpnStatus {
    unsafe { eval_into(expression, &NoVariables, out) }
}

/// Evaluate an expression with 64-bit integer arithmetic
///
/// # Safety
/// `expression` must be a valid C string and `out` a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_i64(expression: *const c_char, out: *mut i64) -> RpnStatus {
    unsafe { eval_into(expression, &NoVariables, out) }
}

/// Evaluate an expression with single precision floats
///
/// # Safety
/// `expression` must be a valid C string and `out` a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_f32(expression: *const c_char, out: *mut f32) -> RpnStatus {
    unsafe { eval_into(expression, &NoVariables, out) }
}

/// Evaluate an expression with double precision floats
///
/// # Safety
/// `expression` must be a valid C string and `out` a valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_f64(expression: *const c_char, out: *mut f64) -> RpnStatus {
    unsafe { eval_into(expression, &NoVariables, out) }
}

/// Evaluate an expression with 32-bit integers and named variables
///
/// # Parameters
/// - `expression`: NUL-terminated UTF-8 expression
/// - `names`: Array of `count` NUL-terminated variable names
/// - `values`: Array of `count` values, parallel to `names`
/// - `count`: Number of variables (may be 0, in which case the arrays may be NULL)
/// - `out`: Receives the result, or 0 on failure
///
/// # Safety
/// All pointers must be valid for the lengths given.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_i32_with_variables(
    expression: *const c_char,
    names: *const *const c_char,
    values: *const i32,
    count: usize,
    out: *mut i32,
) -> RpnStatus {
    unsafe { eval_with_arrays(expression, names, values, count, out) }
}

/// Evaluate an expression with 64-bit integers and named variables
///
/// # Safety
/// All pointers must be valid for the lengths given.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_i64_with_variables(
    expression: *const c_char,
    names: *const *const c_char,
    values: *const i64,
    count: usize,
    out: *mut i64,
) -> RpnStatus {
    unsafe { eval_with_arrays(expression, names, values, count, out) }
}

/// Evaluate an expression with single precision floats and named variables
///
/// # Safety
/// All pointers must be valid for the lengths given.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_f32_with_variables(
    expression: *const c_char,
    names: *const *const c_char,
    values: *const f32,
    count: usize,
    out: *mut f32,
) -> RpnStatus {
    unsafe { eval_with_arrays(expression, names, values, count, out) }
}

/// Evaluate an expression with double precision floats and named variables
///
/// # Safety
/// All pointers must be valid for the lengths given.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rpn_eval_f64_with_variables(
    expression: *const c_char,
    names: *const *const c_char,
    values: *const f64,
    count: usize,
    out: *mut f64,
) -> RpnStatus {
    unsafe { eval_with_arrays(expression, names, values, count, out) }
}
