//! Article form shared by the create and edit pages
//!
//! Owns the draft signals, the optional image (with a local preview) and the
//! transient banner. Create resets the form after a successful publish; edit
//! navigates back to the article.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::core::articles::Banner;
use crate::core::models::{ArticleDraft, ImageUpload};
use crate::core::validation::{self, Field};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{BannerMessage, FormField, InlineSpinner, TextAreaField, show_banner};
use crate::ui::icon::{Icon, icons};
use crate::ui::use_lifetime;

/// What the form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleFormMode {
    Create,
    Edit(i64),
}

impl ArticleFormMode {
    fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Publish",
            Self::Edit(_) => "Save changes",
        }
    }

    fn busy_label(self) -> &'static str {
        match self {
            Self::Create => "Publishing...",
            Self::Edit(_) => "Saving...",
        }
    }
}

/// Image picked in the form, with its object URL for the preview
#[derive(Debug, Clone, PartialEq)]
struct PickedImage {
    upload: ImageUpload,
    preview_url: String,
}

#[component]
pub fn ArticleForm(
    mode: ArticleFormMode,
    /// Values to start from
    #[prop(optional)]
    initial: Option<ArticleDraft>,
    /// Image already stored with the article
    #[prop(default = None)]
    current_image: Option<String>,
) -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();
    let navigate = use_navigate();

    let initial = initial.unwrap_or_default();
    let title = RwSignal::new(initial.title);
    let content = RwSignal::new(initial.content);
    let picked = RwSignal::new(None::<PickedImage>);
    let busy = RwSignal::new(false);
    let banner = RwSignal::new(None::<Banner>);
    let saved = RwSignal::new(None::<i64>);

    let title_error = RwSignal::new(None::<String>);
    let content_error = RwSignal::new(None::<String>);

    let file_input = NodeRef::<leptos::html::Input>::new();

    let can_submit = Signal::derive(move || {
        title.with(|t| content.with(|c| validation::can_submit_article(t, c, busy.get())))
    });

    Effect::new(move |_| {
        if let Some(id) = saved.get() {
            navigate(&format!("/articles/{id}"), Default::default());
        }
    });

    let clear_image = move || {
        if let Some(image) = picked.get_untracked() {
            revoke_preview(&image.preview_url);
        }
        picked.set(None);
        #[cfg(not(feature = "ssr"))]
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    on_cleanup(move || {
        if let Some(image) = picked.try_get_untracked().flatten() {
            revoke_preview(&image.preview_url);
        }
    });

    let on_file_change = {
        let lifetime = lifetime.clone();
        move |ev: leptos::ev::Event| {
            #[cfg(not(feature = "ssr"))]
            {
                let Some(file) = selected_file(&ev) else {
                    return;
                };
                let lifetime = lifetime.clone();
                spawn_local(async move {
                    match lifetime.run(read_image(file)).await {
                        Some(Ok(image)) => {
                            if let Some(previous) = picked.get_untracked() {
                                revoke_preview(&previous.preview_url);
                            }
                            picked.set(Some(image));
                        }
                        Some(Err(message)) => {
                            leptos::logging::warn!("Failed to read image: {}", message);
                            show_banner(banner, &lifetime, Banner::error(message));
                        }
                        None => {}
                    }
                });
            }
            #[cfg(feature = "ssr")]
            {
                let _ = (ev, &lifetime);
            }
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let result = title.with_untracked(|t| {
            content.with_untracked(|c| validation::validate_article(t, c))
        });
        title_error.set(result.message_for(Field::Title));
        content_error.set(result.message_for(Field::Content));
        if !result.is_valid() || busy.get_untracked() {
            return;
        }

        let draft = ArticleDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
            image: picked.with_untracked(|p| p.as_ref().map(|p| p.upload.clone())),
        };

        busy.set(true);
        banner.set(None);
        let client = auth.client();
        let lifetime = lifetime.clone();
        spawn_local(async move {
            let request = async {
                match mode {
                    ArticleFormMode::Create => client.create_article(&draft).await,
                    ArticleFormMode::Edit(id) => client.update_article(id, &draft).await,
                }
            };
            let Some(outcome) = lifetime.run(request).await else {
                return;
            };
            busy.set(false);

            match (mode, outcome) {
                (ArticleFormMode::Create, Ok(article)) => {
                    leptos::logging::log!("Published article {}", article.id);
                    title.set(String::new());
                    content.set(String::new());
                    clear_image();
                    show_banner(banner, &lifetime, Banner::success("Article published"));
                }
                (ArticleFormMode::Edit(_), Ok(article)) => saved.set(Some(article.id)),
                // The 401 handler is already on its way to the login page
                (_, Err(e)) if e.is_session_expired() => {}
                (_, Err(e)) => show_banner(banner, &lifetime, Banner::error(e.to_string())),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6" novalidate=true>
            <BannerMessage banner=banner on_dismiss=Callback::new(move |_| banner.set(None)) />

            <FormField
                id="title"
                label="Title"
                required=true
                placeholder="A catchy title"
                value=title
                disabled=busy
                error=title_error
            />

            <TextAreaField
                id="content"
                label="Content"
                required=true
                placeholder="Write your article..."
                value=content
                rows=14
                disabled=busy
                error=content_error
            />

            <div class="space-y-2">
                <label for="image" class="label">"Cover image"</label>
                {move || match picked.get() {
                    Some(image) => view! {
                        <div class="relative inline-block">
                            <img src=image.preview_url alt="Selected cover" class="max-h-64 rounded-lg" />
                            <button
                                type="button"
                                class="btn-icon absolute top-2 right-2 bg-theme-primary"
                                aria-label="Remove image"
                                disabled=move || busy.get()
                                on:click=move |_| clear_image()
                            >
                                <Icon name=icons::X class="h-4 w-4" />
                            </button>
                        </div>
                    }.into_any(),
                    None => current_image.clone().map(|src| view! {
                        <div class="space-y-1">
                            <img src=src alt="Current cover" class="max-h-64 rounded-lg" />
                            <p class="text-xs text-theme-tertiary">"Pick a new file to replace it"</p>
                        </div>
                    }).into_any(),
                }}
                <label class="btn-secondary inline-flex items-center gap-2 cursor-pointer">
                    <Icon name=icons::IMAGE class="h-4 w-4" />
                    "Choose image"
                    <input
                        node_ref=file_input
                        id="image"
                        type="file"
                        accept="image/*"
                        class="hidden"
                        disabled=move || busy.get()
                        on:change=on_file_change
                    />
                </label>
            </div>

            <div class="flex justify-end">
                <button type="submit" class="btn-primary" disabled=move || !can_submit.get()>
                    {move || if busy.get() {
                        view! {
                            <span class="flex items-center gap-2">
                                <InlineSpinner />
                                {mode.busy_label()}
                            </span>
                        }.into_any()
                    } else {
                        view! { <span>{mode.submit_label()}</span> }.into_any()
                    }}
                </button>
            </div>
        </form>
    }
}

#[cfg(not(feature = "ssr"))]
fn revoke_preview(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

#[cfg(feature = "ssr")]
fn revoke_preview(_url: &str) {}

#[cfg(not(feature = "ssr"))]
fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    let input = event_target::<web_sys::HtmlInputElement>(ev);
    input.files().and_then(|files| files.get(0))
}

/// Read the picked file into memory and create its preview URL
#[cfg(not(feature = "ssr"))]
async fn read_image(file: web_sys::File) -> Result<PickedImage, String> {
    use wasm_bindgen_futures::JsFuture;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Could not read the selected image".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let preview_url = web_sys::Url::create_object_url_with_blob(&file)
        .map_err(|_| "Could not preview the selected image".to_string())?;

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Ok(PickedImage {
        upload: ImageUpload {
            file_name: file.name(),
            content_type,
            bytes,
        },
        preview_url,
    })
}
