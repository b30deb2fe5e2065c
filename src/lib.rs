//! # Bhaktamar Core
//!
//! Offline reading core for the Bhaktamar Stotra, designed for FFI
//! integration with Flutter and other cross-platform mobile shells. The shell
//! renders screens and reports gestures; this crate owns the verse data,
//! reading positions and the Samputt sequence.
//!
//! ## Features
//!
//! - **Bundled dataset**: the stotra document is parsed and validated once,
//!   then served read-only
//! - **Search**: case-insensitive substring search over all four renderings
//! - **Sequential reading**: verse-by-verse navigation with bounded steps
//! - **Samputt reading**: a chosen verse interleaved as a refrain after every
//!   verse, with a cursor for stepping through it
//! - **Font-size presets**: four levels with fixed per-field sizes
//! - **Safe error handling**: every call answers with a JSON [`AppResponse`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use bhaktamar_core::{create_reader, start_samputt, samputt_step, free_response};
//! use std::ffi::CString;
//!
//! let dataset = CString::new(std::fs::read_to_string("assets/data.json").unwrap()).unwrap();
//! let reader = create_reader(dataset.as_ptr(), std::ptr::null());
//!
//! let view = start_samputt(reader, 20);
//! free_response(view);
//! let view = samputt_step(reader, 1);
//! free_response(view);
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_reader`] / [`create_reader_from_path`] - Load the dataset and create a handle
//! - [`get_app_info`], [`get_introduction`], [`get_all_verses`] - Static content
//! - [`get_verse_by_number`], [`get_verse_by_page`], [`search_verses`] - Lookups
//! - [`open_verse`], [`verse_step`], [`verse_swipe`], [`set_language`] - Sequential reading
//! - [`validate_samputt_input`], [`get_quick_select`] - Samputt selection
//! - [`start_samputt`], [`get_samputt_current`], [`samputt_step`], [`samputt_swipe`], [`end_samputt`] - Samputt reading
//! - [`get_font_sizes`], [`increase_font_size`], [`decrease_font_size`], [`set_font_size_level`] - Font size
//! - [`free_response`] - Release a string returned by any call above
//! - [`close_reader`] - Release the handle
//!
//! A handle is not synchronized internally. The host must not call into the
//! same handle from two threads at once.

pub mod app_response;
pub mod font_size;
pub mod navigation;
pub mod reader_config;
pub mod reader_state;
pub mod samputt;
pub mod selection;
pub mod verse_model;
pub mod verse_repository;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::Serialize;

pub use crate::app_response::AppResponse;
use crate::font_size::FontSizeLevel;
use crate::navigation::NavigationIntent;
use crate::reader_config::ReaderConfig;
use crate::reader_state::ReaderState;
use crate::verse_model::Language;
use crate::verse_repository::VerseRepository;

/// Creates a reader from the dataset JSON and an optional config JSON.
///
/// # Parameters
///
/// * `dataset_json` - Null-terminated C string with the stotra document
/// * `config_json` - Null-terminated C string with a [`ReaderConfig`], or null for defaults
///
/// # Returns
///
/// A pointer to the [`ReaderState`] on success, or a null pointer on failure.
/// Release it with [`close_reader`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use bhaktamar_core::create_reader;
///
/// let dataset = CString::new(r#"{"title":"t","subtitle":"s","description":"d","author":"a","total_pages":0,"pages":[]}"#).unwrap();
/// let config = CString::new(r#"{"font_size":"large"}"#).unwrap();
/// let reader = create_reader(dataset.as_ptr(), config.as_ptr());
/// assert!(!reader.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_reader(dataset_json: *const c_char, config_json: *const c_char) -> *mut ReaderState {
    let dataset = match c_ptr_to_str(dataset_json) {
        Some(s) => s,
        None => {
            warn!("Null or invalid dataset pointer passed to create_reader");
            return std::ptr::null_mut();
        }
    };

    let repository = match VerseRepository::from_json_str(dataset) {
        Ok(repository) => repository,
        Err(e) => {
            warn!("❌ Failed to load dataset: {e}");
            return std::ptr::null_mut();
        }
    };

    build_reader(repository, config_json)
}

/// Creates a reader from a dataset file on disk.
///
/// Same contract as [`create_reader`], with `path` naming the JSON file.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_reader_from_path(path: *const c_char, config_json: *const c_char) -> *mut ReaderState {
    let path = match c_ptr_to_str(path) {
        Some(s) => s,
        None => {
            warn!("Null or invalid path pointer passed to create_reader_from_path");
            return std::ptr::null_mut();
        }
    };

    info!("Loading dataset from: {}", path);

    let repository = match VerseRepository::from_path(path) {
        Ok(repository) => repository,
        Err(e) => {
            warn!("❌ Failed to load dataset from {path}: {e}");
            return std::ptr::null_mut();
        }
    };

    build_reader(repository, config_json)
}

fn build_reader(repository: VerseRepository, config_json: *const c_char) -> *mut ReaderState {
    let config = if config_json.is_null() {
        ReaderConfig::default()
    } else {
        let parsed = c_ptr_to_str(config_json)
            .ok_or_else(|| AppResponse::BadRequest("Invalid UTF-8 in config".to_string()))
            .and_then(ReaderConfig::from_json_str);
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!("❌ Rejected reader config: {e}");
                return std::ptr::null_mut();
            }
        }
    };

    match ReaderState::new(repository, config) {
        Ok(state) => {
            info!("✅ Reader initialized successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to initialize reader: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Returns title, subtitle, description, author and page/verse totals.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_app_info(state: *mut ReaderState) -> *const c_char {
    let state = match state_ref(state, "get_app_info") {
        Ok(s) => s,
        Err(e) => return e,
    };
    response_to_c_string(&AppResponse::json(&state.repository().app_info()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_introduction(state: *mut ReaderState) -> *const c_char {
    let state = match state_ref(state, "get_introduction") {
        Ok(s) => s,
        Err(e) => return e,
    };
    match state.repository().introduction() {
        Some(page) => response_to_c_string(&AppResponse::json(&page)),
        None => response_to_c_string(&AppResponse::NotFound("No introduction page".to_string())),
    }
}

/// Returns every verse page, introductions excluded, in document order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_verses(state: *mut ReaderState) -> *const c_char {
    let state = match state_ref(state, "get_all_verses") {
        Ok(s) => s,
        Err(e) => return e,
    };
    response_to_c_string(&AppResponse::json(&state.repository().all_verses()))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_verse_by_number(state: *mut ReaderState, verse_number: u32) -> *const c_char {
    let state = match state_ref(state, "get_verse_by_number") {
        Ok(s) => s,
        Err(e) => return e,
    };
    match state.repository().get_by_number(verse_number) {
        Some(verse) => response_to_c_string(&AppResponse::json(&verse)),
        None => response_to_c_string(&AppResponse::NotFound(format!(
            "No verse found with number: {verse_number}"
        ))),
    }
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_verse_by_page(state: *mut ReaderState, page_number: u32) -> *const c_char {
    let state = match state_ref(state, "get_verse_by_page") {
        Ok(s) => s,
        Err(e) => return e,
    };
    match state.repository().get_by_page(page_number) {
        Some(page) => response_to_c_string(&AppResponse::json(&page)),
        None => response_to_c_string(&AppResponse::NotFound(format!(
            "No page found with number: {page_number}"
        ))),
    }
}

/// Case-insensitive search over verses. An empty query returns all verses.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_verses(state: *mut ReaderState, query: *const c_char) -> *const c_char {
    let state = match state_ref(state, "search_verses") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let query = match c_ptr_to_string(query, "query") {
        Ok(q) => q,
        Err(e) => return e,
    };
    response_to_c_string(&AppResponse::json(&state.repository().search_verses(&query)))
}

/// Opens verse-by-verse reading at `verse_number`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn open_verse(state: *mut ReaderState, verse_number: u32) -> *const c_char {
    let state = match state_mut(state, "open_verse") {
        Ok(s) => s,
        Err(e) => return e,
    };
    respond(state.open_verse(verse_number))
}

/// Steps the verse reader. `direction` is `-1` (previous) or `1` (next).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn verse_step(state: *mut ReaderState, direction: i32) -> *const c_char {
    let state = match state_mut(state, "verse_step") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let intent = match intent_from_code(direction) {
        Ok(intent) => intent,
        Err(e) => return e,
    };
    respond(state.navigate_verse(intent))
}

/// Feeds a completed horizontal drag to the verse reader.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn verse_swipe(state: *mut ReaderState, translation_x: f64) -> *const c_char {
    let state = match state_mut(state, "verse_swipe") {
        Ok(s) => s,
        Err(e) => return e,
    };
    respond(state.swipe_verse(translation_x))
}

/// Selects the rendering shown by the verse reader
/// (`"sanskrit"`, `"transliteration"`, `"hindi"` or `"english"`).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn set_language(state: *mut ReaderState, language: *const c_char) -> *const c_char {
    let state = match state_mut(state, "set_language") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let name = match c_ptr_to_string(language, "language") {
        Ok(name) => name,
        Err(e) => return e,
    };
    let language: Language = match serde_json::from_value(serde_json::Value::String(name.clone())) {
        Ok(language) => language,
        Err(_) => {
            return response_to_c_string(&AppResponse::ValidationError(format!(
                "Unknown language: {name}"
            )))
        }
    };
    state.set_language(language);
    response_to_c_string(&AppResponse::json(&language))
}

/// Checks free-text Samputt input. On success the payload is the selection preview.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn validate_samputt_input(state: *mut ReaderState, input: *const c_char) -> *const c_char {
    let state = match state_ref(state, "validate_samputt_input") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let input = match c_ptr_to_string(input, "input") {
        Ok(i) => i,
        Err(e) => return e,
    };
    respond(state.validate_selection(&input).map_err(AppResponse::from))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_quick_select(state: *mut ReaderState) -> *const c_char {
    let state = match state_ref(state, "get_quick_select") {
        Ok(s) => s,
        Err(e) => return e,
    };
    response_to_c_string(&AppResponse::json(&state.quick_select()))
}

/// Builds the Samputt sequence for `samputt_verse` and positions the cursor
/// on its first entry. Replaces any running session.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn start_samputt(state: *mut ReaderState, samputt_verse: u32) -> *const c_char {
    let state = match state_mut(state, "start_samputt") {
        Ok(s) => s,
        Err(e) => return e,
    };
    respond(state.start_samputt(samputt_verse))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_samputt_current(state: *mut ReaderState) -> *const c_char {
    let state = match state_ref(state, "get_samputt_current") {
        Ok(s) => s,
        Err(e) => return e,
    };
    respond(state.samputt_view())
}

/// Steps the Samputt cursor. `direction` is `-1` (previous) or `1` (next).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn samputt_step(state: *mut ReaderState, direction: i32) -> *const c_char {
    let state = match state_mut(state, "samputt_step") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let intent = match intent_from_code(direction) {
        Ok(intent) => intent,
        Err(e) => return e,
    };
    respond(state.navigate_samputt(intent))
}

/// Feeds a completed horizontal drag to the Samputt cursor.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn samputt_swipe(state: *mut ReaderState, translation_x: f64) -> *const c_char {
    let state = match state_mut(state, "samputt_swipe") {
        Ok(s) => s,
        Err(e) => return e,
    };
    respond(state.swipe_samputt(translation_x))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn end_samputt(state: *mut ReaderState) -> *const c_char {
    let state = match state_mut(state, "end_samputt") {
        Ok(s) => s,
        Err(e) => return e,
    };
    if state.end_samputt() {
        response_to_c_string(&AppResponse::success("Samputt session ended"))
    } else {
        response_to_c_string(&AppResponse::NotFound("No Samputt session is active".to_string()))
    }
}

#[derive(Serialize)]
struct FontSizePayload {
    level: FontSizeLevel,
    sizes: font_size::FontSizes,
}

fn font_size_response(state: &ReaderState) -> *const c_char {
    let payload = FontSizePayload {
        level: state.font_size().level(),
        sizes: state.font_size().sizes(),
    };
    response_to_c_string(&AppResponse::json(&payload))
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_font_sizes(state: *mut ReaderState) -> *const c_char {
    match state_ref(state, "get_font_sizes") {
        Ok(s) => font_size_response(s),
        Err(e) => e,
    }
}

/// Moves one preset up; stays put at `extra-large`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn increase_font_size(state: *mut ReaderState) -> *const c_char {
    let state = match state_mut(state, "increase_font_size") {
        Ok(s) => s,
        Err(e) => return e,
    };
    state.font_size_mut().increase();
    font_size_response(state)
}

/// Moves one preset down; stays put at `small`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn decrease_font_size(state: *mut ReaderState) -> *const c_char {
    let state = match state_mut(state, "decrease_font_size") {
        Ok(s) => s,
        Err(e) => return e,
    };
    state.font_size_mut().decrease();
    font_size_response(state)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn set_font_size_level(state: *mut ReaderState, level: *const c_char) -> *const c_char {
    let state = match state_mut(state, "set_font_size_level") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let name = match c_ptr_to_string(level, "level") {
        Ok(name) => name,
        Err(e) => return e,
    };
    match FontSizeLevel::from_name(&name) {
        Some(level) => {
            state.font_size_mut().set_level(level);
            font_size_response(state)
        }
        None => response_to_c_string(&AppResponse::ValidationError(format!(
            "Unknown font size level: {name}"
        ))),
    }
}

/// Releases a string returned by any function of this library.
///
/// Passing null is a no-op. Each string must be released exactly once.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}

/// Releases a reader handle. Any running session is discarded with it.
///
/// Passing null is a no-op. The handle must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_reader(state: *mut ReaderState) {
    if state.is_null() {
        warn!("Null state pointer passed to close_reader");
        return;
    }
    unsafe {
        drop(Box::from_raw(state));
    }
    info!("Reader closed");
}

/// Serializes a result: `Ok` payloads go through [`AppResponse::json`],
/// errors are returned as they are.
fn respond<T: Serialize>(result: Result<T, AppResponse>) -> *const c_char {
    match result {
        Ok(payload) => response_to_c_string(&AppResponse::json(&payload)),
        Err(e) => response_to_c_string(&e),
    }
}

fn intent_from_code(direction: i32) -> Result<NavigationIntent, *const c_char> {
    NavigationIntent::from_code(direction).ok_or_else(|| {
        let error = AppResponse::BadRequest(format!(
            "Unknown direction {direction}; expected -1 or 1"
        ));
        response_to_c_string(&error)
    })
}

fn state_ref<'a>(state: *mut ReaderState, caller: &str) -> Result<&'a ReaderState, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn state_mut<'a>(state: *mut ReaderState, caller: &str) -> Result<&'a mut ReaderState, *const c_char> {
    match unsafe { state.as_mut() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a null pointer if serialization or C string creation fails.
/// The caller releases the string with [`free_response`].
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Borrows a C string as `&str`; `None` for null or invalid UTF-8.
fn c_ptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok() }
}

/// Converts a C string pointer to a Rust String.
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - `BadRequest` response in C format if the pointer
///   is null or the bytes are not UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
