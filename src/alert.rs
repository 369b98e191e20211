//! The error alert partial swapped into the `#alert-container` element when
//! an htmx mutation fails.
//!
//! Successful mutations redirect instead, so there is no success variant.

use maud::{Markup, html};

/// An error alert with a headline and an optional detail line.
pub struct AlertTemplate<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class="flex items-start gap-3 p-4 text-sm rounded-lg border \
                    text-red-800 bg-red-50 border-red-300 \
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                    role="alert"
                {
                    span class="font-bold" { "!" }

                    div
                    {
                        p class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p { (self.details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-auto font-bold cursor-pointer"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        )
    }
}
