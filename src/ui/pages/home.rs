//! Home page: every article, newest first as the API orders them

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::articles::{EXCERPT_LENGTH, ListState, excerpt, format_timestamp};
use crate::core::models::Article;
use crate::ui::auth::{Avatar, use_auth_context};
use crate::ui::common::{ErrorMessage, LoadingSpinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::use_lifetime;

/// Home page component
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();
    let list = RwSignal::new(ListState::Loading);

    // Fetch once on mount
    Effect::new(move |_| {
        let client = auth.client();
        let lifetime = lifetime.clone();
        spawn_local(async move {
            if let Some(result) = lifetime.run(client.list_articles()).await {
                if let Err(e) = &result {
                    leptos::logging::warn!("Failed to load articles (status {:?}): {}", e.status(), e);
                }
                list.set(ListState::from_result(result));
            }
        });
    });

    view! {
        <section class="space-y-8">
            <div class="flex items-end justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-theme-primary">"Latest articles"</h1>
                    <p class="mt-1 text-theme-secondary">"Stories and notes from our writers"</p>
                </div>
                <Show when=move || auth.is_authenticated()>
                    <A href="/create-article" attr:class="btn-primary flex items-center gap-1">
                        <Icon name=icons::PLUS class="h-4 w-4" />
                        "Write"
                    </A>
                </Show>
            </div>

            {move || match list.get() {
                ListState::Loading => view! { <LoadingSpinner message="Loading articles...".to_string() /> }.into_any(),
                ListState::Empty => view! {
                    <div class="text-center py-16 text-theme-secondary">
                        <Icon name=icons::DOCUMENT_TEXT class="w-12 h-12 mx-auto mb-4" />
                        <p>"No articles yet."</p>
                    </div>
                }.into_any(),
                ListState::Failed(message) => view! {
                    <ErrorMessage error=Signal::derive(move || Some(message.clone())) />
                }.into_any(),
                ListState::Loaded(articles) => view! {
                    <div class="grid gap-6 sm:grid-cols-2">
                        {articles.into_iter().map(|article| view! { <ArticleCard article=article /> }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}

/// Summary card linking to the article
#[component]
fn ArticleCard(article: Article) -> impl IntoView {
    let href = format!("/articles/{}", article.id);
    let summary = excerpt(&article.content, EXCERPT_LENGTH);
    let published = format_timestamp(&article.created_at);
    let alt = article.title.clone();

    view! {
        <article class="card overflow-hidden flex flex-col">
            {article.image.clone().map(|src| view! {
                <A href=href.clone()>
                    <img src=src alt=alt class="w-full h-48 object-cover" />
                </A>
            })}
            <div class="p-5 flex flex-col gap-3 flex-1">
                <h2 class="text-xl font-semibold text-theme-primary">
                    <A href=href.clone() attr:class="hover:underline">{article.title.clone()}</A>
                </h2>
                <p class="text-theme-secondary flex-1">{summary}</p>
                <div class="flex items-center gap-2 text-sm text-theme-tertiary">
                    <Avatar name=article.author.name.clone() size=24 />
                    <span>{article.author.name.clone()}</span>
                    <span>"·"</span>
                    <time datetime=article.created_at.clone()>{published}</time>
                </div>
            </div>
        </article>
    }
}
