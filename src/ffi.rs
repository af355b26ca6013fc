//! C-ABI FFI bindings for cross-language integration.
//!
//! Lets hosts written in other languages call the converter. Options are
//! passed as a JSON string in the same camelCase format as
//! [`ConvertOptions`].

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::convert::{convert, ConvertOptions};

/// Result structure returned by [`htmldocx_convert`].
#[repr(C)]
pub struct HtmlDocxResult {
    /// Whether the conversion succeeded.
    pub success: bool,
    /// DOCX bytes (null if failed). Freed by `htmldocx_free_result`.
    pub data: *mut u8,
    /// Length of `data` in bytes.
    pub len: usize,
    /// Error message (null if succeeded). Freed by `htmldocx_free_result`.
    pub error: *mut c_char,
}

impl HtmlDocxResult {
    fn success(bytes: Vec<u8>) -> Self {
        let mut bytes = bytes.into_boxed_slice();
        let len = bytes.len();
        let data = bytes.as_mut_ptr();
        std::mem::forget(bytes);
        Self {
            success: true,
            data,
            len,
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            len: 0,
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn read_str<'a>(value: *const c_char, name: &str) -> Result<Option<&'a str>, String> {
    if value.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(value)
        .to_str()
        .map(Some)
        .map_err(|_| format!("Invalid UTF-8 {}", name))
}

/// Convert HTML to DOCX.
///
/// `options_json` may be null to use the default options.
///
/// # Safety
///
/// `html` must be a valid null-terminated UTF-8 string, `options_json` null
/// or a valid null-terminated UTF-8 string. The returned result must be freed
/// with `htmldocx_free_result`.
#[no_mangle]
pub unsafe extern "C" fn htmldocx_convert(
    html: *const c_char,
    options_json: *const c_char,
) -> HtmlDocxResult {
    let html = match read_str(html, "html") {
        Ok(Some(s)) => s,
        Ok(None) => return HtmlDocxResult::error("HTML cannot be null".to_string()),
        Err(e) => return HtmlDocxResult::error(e),
    };

    let options = match read_str(options_json, "options") {
        Ok(Some(json)) => match ConvertOptions::from_json(json) {
            Ok(options) => options,
            Err(e) => return HtmlDocxResult::error(e.to_string()),
        },
        Ok(None) => ConvertOptions::default(),
        Err(e) => return HtmlDocxResult::error(e),
    };

    match convert(html, &options) {
        Ok(bytes) => HtmlDocxResult::success(bytes),
        Err(e) => HtmlDocxResult::error(e.to_string()),
    }
}

/// Free a result returned by [`htmldocx_convert`].
///
/// # Safety
///
/// The `result` must have been returned by `htmldocx_convert`.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn htmldocx_free_result(result: HtmlDocxResult) {
    if !result.data.is_null() {
        let slice = ptr::slice_from_raw_parts_mut(result.data, result.len);
        drop(Box::from_raw(slice));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the htmldocx library.
///
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub extern "C" fn htmldocx_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!htmldocx_version().is_null());
    }

    #[test]
    fn test_null_html() {
        unsafe {
            let result = htmldocx_convert(ptr::null(), ptr::null());
            assert!(!result.success);
            assert!(!result.error.is_null());
            htmldocx_free_result(result);
        }
    }

    #[test]
    fn test_convert_with_options() {
        let html = CString::new("<p>hello</p>").unwrap();
        let options = CString::new(r#"{"defaultFontSize": 11}"#).unwrap();
        unsafe {
            let result = htmldocx_convert(html.as_ptr(), options.as_ptr());
            assert!(result.success);
            assert!(result.len > 0);
            let bytes = std::slice::from_raw_parts(result.data, result.len);
            assert_eq!(&bytes[..2], b"PK");
            htmldocx_free_result(result);
        }
    }

    #[test]
    fn test_bad_options_json() {
        let html = CString::new("<p>hello</p>").unwrap();
        let options = CString::new("{not json").unwrap();
        unsafe {
            let result = htmldocx_convert(html.as_ptr(), options.as_ptr());
            assert!(!result.success);
            htmldocx_free_result(result);
        }
    }
}
