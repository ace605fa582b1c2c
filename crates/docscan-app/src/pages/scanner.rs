// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner page — capture pages, review them, save them as one PDF.
//
// All state lives in the session manager; this page renders its
// `ViewState` and refreshes it after every operation.

use std::time::Duration;

use dioxus::prelude::*;

use docscan_core::error::DocscanError;
use docscan_core::human_errors::{Severity, humanize_error};

use crate::services::app_services::AppServices;

/// How long a toast stays on screen without a newer one replacing it.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// One line on the toast. Notifier messages carry no severity and use the
/// neutral colour.
#[derive(Debug, Clone, PartialEq)]
struct Toast {
    text: String,
    severity: Option<Severity>,
}

impl Toast {
    fn plain(text: String) -> Self {
        Self { text, severity: None }
    }

    fn from_error(err: &DocscanError) -> Self {
        let human = humanize_error(err);
        Self {
            text: format!("{} {}", human.message, human.suggestion),
            severity: Some(human.severity),
        }
    }

    fn background(&self) -> &'static str {
        match self.severity {
            None | Some(Severity::Benign) => "#333",
            Some(Severity::ActionRequired) => "#b26a00",
            Some(Severity::Permanent) => "#b00020",
        }
    }
}

#[component]
pub fn Scanner() -> Element {
    let svc = use_context::<AppServices>();
    let mut view = use_signal({
        let svc = svc.clone();
        move || svc.session().view_state()
    });
    let mut toast = use_signal(|| Option::<Toast>::None);

    // Drain notifier messages into the toast line.
    {
        let svc = svc.clone();
        use_hook(move || {
            if let Some(mut rx) = svc.take_toasts() {
                spawn(async move {
                    while let Some(first) = rx.recv().await {
                        toast.set(Some(Toast::plain(first)));
                        loop {
                            match tokio::time::timeout(TOAST_DURATION, rx.recv()).await {
                                Ok(Some(next)) => toast.set(Some(Toast::plain(next))),
                                Ok(None) => return,
                                Err(_) => {
                                    toast.set(None);
                                    break;
                                }
                            }
                        }
                    }
                });
            }
        });
    }

    let state = view.read().clone();
    let count = state.images.len();
    let current_toast = toast.read().clone().map(|t| (t.background(), t.text));

    rsx! {
        div { style: "display: flex; flex-direction: column; align-items: center; padding: 10px 0;",
            h1 { style: "font-size: 22px; padding: 12px 20px; border-bottom: 4px solid green; margin-bottom: 40px;",
                "Docx Scanner"
            }

            // Capture
            button {
                style: "padding: 10px 40px; border-radius: 8px; border: none; background: red; color: white; margin-bottom: 32px;",
                disabled: !state.can_capture,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let session = svc.session().clone();
                        spawn(async move {
                            match session.capture().await {
                                Ok(_) | Err(DocscanError::CaptureCancelled) => {}
                                Err(e) => tracing::debug!(error = %e, "capture did not add a page"),
                            }
                            view.set(session.view_state());
                        });
                    }
                },
                "SCAN DOCUMENT"
            }

            // Pages
            div { style: "height: 350px; width: 100%; margin-bottom: 40px;",
                if state.images.is_empty() {
                    div { style: "height: 100%; display: flex; align-items: center; justify-content: center; font-size: 18px;",
                        "No images uploaded yet!"
                    }
                } else {
                    div { style: "display: flex; gap: 20px; overflow-x: auto; padding: 0 20px;",
                        for image in state.images.iter() {
                            {
                                let id = image.id;
                                let src = image.path.to_string();
                                let svc = svc.clone();
                                rsx! {
                                    div { key: "{id}", style: "position: relative; min-width: 200px; height: 300px;",
                                        img { src: "{src}", style: "width: 200px; height: 300px; border: 6px solid #e1e1e1; object-fit: cover;" }
                                        button {
                                            style: "position: absolute; bottom: -20px; left: 50%; transform: translateX(-50%); width: 35px; height: 35px; border-radius: 20px; border: none; background: #e1e1e1;",
                                            onclick: move |_| {
                                                svc.session().delete(id);
                                                view.set(svc.session().view_state());
                                            },
                                            "\u{2715}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if count > 0 {
                p { style: "color: #666; font-size: 14px;", "{count} page(s)" }
            }

            // Export
            button {
                style: "padding: 10px 40px; border-radius: 8px; border: none; background: green; color: white; margin-bottom: 20px;",
                disabled: !state.can_export,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let session = svc.session().clone();
                        spawn(async move {
                            // The manager only raises its in-flight flag once the
                            // export is polled, so disable the button up front.
                            let mut pending = session.view_state();
                            pending.exporting = true;
                            pending.can_export = false;
                            view.set(pending);

                            match session.export().await {
                                Ok(done) => tracing::info!(
                                    path = %done.output_path.display(),
                                    pages = done.page_count,
                                    "export finished"
                                ),
                                Err(
                                    e @ (DocscanError::ExportInvalidState
                                    | DocscanError::ExportBusy),
                                ) => toast.set(Some(Toast::from_error(&e))),
                                Err(e) => {
                                    tracing::debug!(error = %e, "export failed");
                                }
                            }
                            view.set(session.view_state());
                        });
                    }
                },
                if state.exporting { "SAVING..." } else { "GENERATE PDF" }
            }

            // Reset
            button {
                style: "padding: 10px 40px; border-radius: 8px; border: none; background: grey; color: white;",
                disabled: !state.can_reset,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        svc.session().reset();
                        view.set(svc.session().view_state());
                    }
                },
                "RESET"
            }

            if let Some((background, text)) = current_toast {
                p { style: "margin-top: 24px; padding: 8px 16px; border-radius: 16px; background: {background}; color: white; font-size: 14px;",
                    "{text}"
                }
            }
        }
    }
}
