//! C API for embedding the parser in other runtimes.
//!
//! ```c
//! Query *q = sqlit_query_parse("select * from accounts");
//! if (q == NULL) {
//!     char *err = sqlit_error_last();
//!     fprintf(stderr, "%s\n", err);
//!     sqlit_string_free(err);
//! } else {
//!     char *sql = sqlit_query_sql(q);
//!     puts(sql);
//!     sqlit_string_free(sql);
//!     sqlit_query_free(q);
//! }
//! ```
//!
//! Errors are kept per thread until read with [`sqlit_error_last`].

// Pointers are null-checked before every dereference.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::ast::Query;
use crate::transpiler::ToSql;

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_error(msg: impl Into<String>) {
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg.into()));
}

fn take_error() -> Option<String> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(e) => {
            set_error(format!("NUL byte in output: {}", e));
            std::ptr::null_mut()
        }
    }
}

fn describe(query: *const Query, f: impl FnOnce(&Query) -> Option<String>) -> *mut c_char {
    if query.is_null() {
        set_error("NULL query");
        return std::ptr::null_mut();
    }
    let query = unsafe { &*query };
    match f(query) {
        Some(out) => into_c_string(out),
        None => std::ptr::null_mut(),
    }
}

/// Parse one command line.
/// Returns NULL on error (check sqlit_error_last).
/// Free the result with sqlit_query_free().
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_query_parse(input: *const c_char) -> *mut Query {
    if input.is_null() {
        set_error("NULL input");
        return std::ptr::null_mut();
    }

    let input = match unsafe { CStr::from_ptr(input) }.to_str() {
        Ok(s) => s,
        Err(e) => {
            set_error(format!("Invalid UTF-8: {}", e));
            return std::ptr::null_mut();
        }
    };

    match crate::parse(input) {
        Ok(query) => Box::into_raw(Box::new(query)),
        Err(e) => {
            set_error(e.to_string());
            std::ptr::null_mut()
        }
    }
}

/// Debug representation of a parsed query.
/// Free the result with sqlit_string_free().
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_query_debug(query: *const Query) -> *mut c_char {
    describe(query, |q| Some(format!("{:?}", q)))
}

/// Canonical SQL for a parsed query.
/// Free the result with sqlit_string_free().
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_query_sql(query: *const Query) -> *mut c_char {
    describe(query, |q| Some(q.to_sql()))
}

/// JSON form of a parsed query.
/// Free the result with sqlit_string_free().
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_query_json(query: *const Query) -> *mut c_char {
    describe(query, |q| match serde_json::to_string(q) {
        Ok(json) => Some(json),
        Err(e) => {
            set_error(format!("JSON error: {}", e));
            None
        }
    })
}

/// Free a query returned by sqlit_query_parse().
/// Safe to call with NULL.
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_query_free(query: *mut Query) {
    if !query.is_null() {
        unsafe {
            drop(Box::from_raw(query));
        }
    }
}

/// Take the most recent error on this thread, clearing it.
/// Returns NULL if there is none. Free the result with sqlit_string_free().
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_error_last() -> *mut c_char {
    match take_error() {
        Some(msg) => into_c_string(msg),
        None => std::ptr::null_mut(),
    }
}

/// Free a string returned by this library.
/// Safe to call with NULL.
#[unsafe(no_mangle)]
pub extern "C" fn sqlit_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}
