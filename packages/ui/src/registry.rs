//! Registry context and hooks for the UI.

use std::future::Future;

use api::{ApiBackend, ApiIdentity};
use dioxus::prelude::*;
use store::RegistryConfig;

use crate::controller::ViewController;

/// The controller wired to the server functions.
pub type Registry = ViewController<ApiBackend, ApiIdentity>;

const REGISTRY_TOML: &str = include_str!("../registry.toml");

/// Build a controller from the embedded `registry.toml`.
pub fn make_registry() -> Registry {
    let config = RegistryConfig::from_toml(REGISTRY_TOML).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}, using defaults: {}", RegistryConfig::filename(), e);
        RegistryConfig::default()
    });
    ViewController::new(ApiBackend::new(), ApiIdentity, config)
}

/// Get the registry signal provided by [`RegistryProvider`].
pub fn use_registry() -> Signal<Registry> {
    use_context::<Signal<Registry>>()
}

/// Run an async controller operation on a snapshot of the registry and write
/// the result back when it completes.
///
/// Dropped if another operation is still running; the registry stays `busy`
/// until the running one is written back.
pub fn dispatch<F, Fut>(mut registry: Signal<Registry>, op: F)
where
    F: FnOnce(Registry) -> Fut + 'static,
    Fut: Future<Output = Registry> + 'static,
{
    let Some(snapshot) = registry.write().begin() else {
        return;
    };
    spawn(async move {
        let next = op(snapshot).await;
        registry.set(next);
    });
}

/// Provider component that owns the registry state.
/// Wrap your app with this component to enable the registry views.
#[component]
pub fn RegistryProvider(children: Element) -> Element {
    let registry = use_context_provider(|| Signal::new(make_registry()));

    // Resume an existing session (or land on sign-in) on mount
    use_hook(move || {
        dispatch(registry, |mut ctl| async move {
            ctl.init().await;
            ctl
        })
    });

    rsx! {
        {children}
    }
}
