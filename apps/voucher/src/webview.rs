//! The browser view: fetches the saved page with Blitz and mounts it as a
//! sub-document filling the window.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as Ao};

use blitz_dom::{DocumentConfig, FontContext};
use blitz_html::{HtmlDocument, HtmlProvider};
use blitz_traits::navigation::{NavigationOptions, NavigationProvider};
use blitz_traits::net::Request;
use blitz_traits::shell::ShellProvider;
use dioxus_native::prelude::dioxus_core::Task;
use dioxus_native::{SubDocumentAttr, prelude::*};
use linebender_resource_handle::Blob;
use voucher_shell::{ShellEvent, VoucherUrl};

type StdNetProvider = blitz_net::Provider;
type SyncSignal<T> = Signal<T, SyncStorage>;

const EMPTY_PAGE: &str = "<!DOCTYPE html><html><body></body></html>";

/// Shows `url` full-screen with a small overlay button to change it.
#[component]
pub fn Viewer(url: VoucherUrl) -> Element {
    let events = use_coroutine_handle::<ShellEvent>();
    let target: SyncSignal<Request> =
        use_hook(|| Signal::new_maybe_sync(Request::get(url.url().clone())));

    let net_provider = use_context::<Arc<StdNetProvider>>();
    let loader = use_hook(|| Rc::new(DocumentLoader::new(net_provider, target)));
    let content_doc = loader.doc;

    use_effect(move || {
        let request = target.read().clone();
        tracing::info!("Loading {}", request.url);
        loader.load_document(request);
    });

    rsx!(
        div { class: "viewer",
            web-view {
                class: "webview",
                "__webview_document": content_doc(),
            }
            div { class: "change-link",
                button {
                    class: "change-link-button",
                    onclick: move |_| events.send(ShellEvent::ResetRequested),
                    "CHANGE LINK"
                }
            }
        }
    )
}

/// Links followed inside the page load in the same view. The saved address
/// is left alone.
struct ViewerNavProvider {
    target: SyncSignal<Request>,
}

impl NavigationProvider for ViewerNavProvider {
    fn navigate_to(&self, options: NavigationOptions) {
        let mut target = self.target;
        target.set(options.into_request());
    }
}

enum DocumentLoaderStatus {
    Loading { request_id: usize, task: Task },
    Idle,
}

struct DocumentLoader {
    font_ctx: FontContext,
    net_provider: Arc<StdNetProvider>,
    status: Signal<DocumentLoaderStatus>,
    request_id_counter: AtomicUsize,
    doc: Signal<Option<SubDocumentAttr>>,
    target: SyncSignal<Request>,
}

impl DocumentLoader {
    fn new(net_provider: Arc<StdNetProvider>, target: SyncSignal<Request>) -> Self {
        let mut font_ctx = FontContext::default();
        font_ctx
            .collection
            .register_fonts(Blob::new(Arc::new(blitz_dom::BULLET_FONT) as _), None);

        Self {
            font_ctx,
            net_provider,
            status: Signal::new(DocumentLoaderStatus::Idle),
            request_id_counter: AtomicUsize::new(0),
            doc: Signal::new(None),
            target,
        }
    }

    fn load_document(&self, req: Request) {
        let request_id = self.request_id_counter.fetch_add(1, Ao::Relaxed);
        let net_provider = Arc::clone(&self.net_provider);
        let font_ctx = self.font_ctx.clone();
        let mut status = self.status;
        let doc_signal = self.doc;
        let target = self.target;
        let requested_url = req.url.to_string();

        if let DocumentLoaderStatus::Loading { task, .. } = *self.status.peek() {
            task.cancel();
        };

        let task = spawn(async move {
            let response = net_provider.fetch_async(req).await;

            let is_latest = matches!(
                *status.peek(),
                DocumentLoaderStatus::Loading { request_id: latest, .. } if latest == request_id
            );
            if !is_latest {
                tracing::debug!("Ignoring load of {requested_url}: superseded");
                return;
            }

            let (base_url, html) = match response {
                Ok((resolved_url, bytes)) => {
                    tracing::info!("Loaded {resolved_url}");
                    let html = if bytes.is_empty() {
                        EMPTY_PAGE.to_string()
                    } else {
                        String::from_utf8_lossy(&bytes).into_owned()
                    };
                    (resolved_url, html)
                }
                Err(err) => {
                    tracing::warn!("Error loading {requested_url}: {err:?}");
                    let html = error_page(&requested_url);
                    (requested_url, html)
                }
            };

            let config = DocumentConfig {
                viewport: None,
                base_url: Some(base_url),
                ua_stylesheets: None,
                net_provider: Some(net_provider as _),
                navigation_provider: Some(Arc::new(ViewerNavProvider { target })),
                shell_provider: Some(consume_context::<Arc<dyn ShellProvider>>()),
                html_parser_provider: Some(Arc::new(HtmlProvider)),
                font_ctx: Some(font_ctx),
                ..Default::default()
            };

            let document = HtmlDocument::from_html(&html, config).into_inner();
            *doc_signal.write_unchecked() = Some(SubDocumentAttr::new(document));
            status.set(DocumentLoaderStatus::Idle);
        });

        *self.status.write_unchecked() = DocumentLoaderStatus::Loading { request_id, task };
    }
}

fn error_page(url: &str) -> String {
    let url = html_escape::encode_text(url);
    format!(
        "<!DOCTYPE html><html><body style=\"font-family: sans-serif; padding: 24px\">\
         <h2>This page could not be loaded</h2><p>{url}</p>\
         <p>Check your connection, or use CHANGE LINK to enter a different address.</p>\
         </body></html>"
    )
}
