//! Mobile menu toggle and the footer copyright year. Pure DOM flips; every
//! element here is optional per page, so absence is logged and skipped.

/// Button that opens and closes the mobile menu.
pub const MENU_BUTTON_ID: &str = "mobile-menu-button";
/// The mobile menu container; visibility is driven by the `hidden` class.
pub const MENU_ID: &str = "mobile-menu";
/// Span receiving the current year in the footer.
pub const YEAR_ID: &str = "currentYear";

/// `aria-expanded` value for the button after a toggle that left the menu in
/// the given hidden state.
pub fn aria_expanded(menu_hidden: bool) -> &'static str {
    if menu_hidden {
        "false"
    } else {
        "true"
    }
}

/// Wire the toggle button to the menu container.
#[cfg(target_arch = "wasm32")]
pub fn install() {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Some(button), Some(menu)) = (
        document.get_element_by_id(MENU_BUTTON_ID),
        document.get_element_by_id(MENU_ID),
    ) else {
        log::debug!("[menu] toggle button or menu not present, skipping");
        return;
    };

    let on_click = {
        let button = button.clone();
        let menu = menu.clone();
        Closure::<dyn FnMut()>::new(move || {
            let now_hidden = menu.class_list().toggle("hidden").unwrap_or(false);
            let _ = button.set_attribute("aria-expanded", aria_expanded(now_hidden));
        })
    };
    if button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[menu] could not attach toggle listener");
    }
    on_click.forget();
}

/// Stamp the footer year span with the current year.
#[cfg(target_arch = "wasm32")]
pub fn stamp_footer_year() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(span) = document.get_element_by_id(YEAR_ID) else {
        log::debug!("[menu] footer year span not present, skipping");
        return;
    };
    let year = js_sys::Date::new_0().get_full_year();
    span.set_text_content(Some(&year.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aria_expanded_tracks_visibility() {
        assert_eq!(aria_expanded(true), "false");
        assert_eq!(aria_expanded(false), "true");
    }
}
