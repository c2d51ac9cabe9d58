//! Copy-to-clipboard with a fallback for insecure contexts and old browsers.

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

/// The async Clipboard API only exists in secure contexts.
fn async_clipboard_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    window.is_secure_context()
        && js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("clipboard"))
            .unwrap_or(false)
}

/// Select the text in a throwaway textarea and run the legacy copy command.
fn copy_with_textarea(text: &str) -> Result<(), JsValue> {
    let document = gloo_utils::document();
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    body.append_child(&textarea)?;
    textarea.select();

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| JsValue::from_str("not an HTML document"))
        .and_then(|doc| doc.exec_command("copy"));
    // Remove the textarea whether or not the copy worked
    body.remove_child(&textarea)?;

    if copied? {
        Ok(())
    } else {
        Err(JsValue::from_str("copy command was rejected"))
    }
}

/// Put `text` on the clipboard. Best effort; the caller reports failures.
pub async fn copy_text(text: &str) -> Result<(), JsValue> {
    if async_clipboard_available() {
        debug!("Copying {} bytes with the Clipboard API", text.len());
        JsFuture::from(clipboard_write_text(text)?).await?;
        Ok(())
    } else {
        debug!("Clipboard API unavailable, falling back to execCommand");
        copy_with_textarea(text)
    }
}
