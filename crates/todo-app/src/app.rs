//! Application bootstrap.
//!
//! An [`App`] collects plugins, then [`App::mount`] attaches it to a target
//! inside a [`Host`]. Mounting consumes the app, so an instance can only be
//! mounted once. The usual sequence is [`bootstrap`]:
//!
//! ```text
//! App::new(api)
//!     .use_plugin(query)    // data-fetching cache
//!     .use_plugin(router)   // route table
//!     .mount(host, "#app")
//! ```

use std::io::{self, Write};

use todo_api::client::TodoClient;
use todo_query::QueryClient;
use tracing::{debug, info, warn};

use crate::pages::{PageContext, RenderError, RenderOptions};
use crate::router::{History, Route, Router};

/// Selector of the element the application attaches to.
pub const MOUNT_SELECTOR: &str = "#app";

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The host has no target for the selector.
    #[error("mount target '{selector}' not found")]
    MountTargetNotFound { selector: String },

    /// A required plugin was never installed.
    #[error("plugin '{0}' is not installed")]
    MissingPlugin(&'static str),

    /// The same plugin was installed twice.
    #[error("plugin '{0}' is already installed")]
    DuplicatePlugin(&'static str),
}

/// The hosting document: resolves selectors to writable targets.
pub trait Host {
    /// Returns the target for `selector`, if the host has one.
    fn find_target(&mut self, selector: &str) -> Option<Box<dyn Write>>;
}

/// Host backed by the terminal: `#app` renders to stdout.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl Host for TerminalHost {
    fn find_target(&mut self, selector: &str) -> Option<Box<dyn Write>> {
        (selector == MOUNT_SELECTOR).then(|| Box::new(io::stdout()) as Box<dyn Write>)
    }
}

/// Something that installs a capability into an application.
pub trait Plugin {
    /// Name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Registers the plugin with the app context.
    fn install(self, ctx: &mut AppContext) -> Result<(), BootstrapError>;
}

impl Plugin for QueryClient {
    fn name(&self) -> &'static str {
        "query"
    }

    fn install(self, ctx: &mut AppContext) -> Result<(), BootstrapError> {
        if ctx.query.is_some() {
            return Err(BootstrapError::DuplicatePlugin("query"));
        }
        ctx.query = Some(self);
        Ok(())
    }
}

impl Plugin for Router {
    fn name(&self) -> &'static str {
        "router"
    }

    fn install(self, ctx: &mut AppContext) -> Result<(), BootstrapError> {
        if ctx.router.is_some() {
            return Err(BootstrapError::DuplicatePlugin("router"));
        }
        ctx.router = Some(self);
        Ok(())
    }
}

/// State plugins install into.
#[derive(Debug)]
pub struct AppContext {
    api: TodoClient,
    query: Option<QueryClient>,
    router: Option<Router>,
    installed: Vec<&'static str>,
    options: RenderOptions,
}

/// An application that has not been mounted yet.
#[derive(Debug)]
pub struct App {
    ctx: AppContext,
    // First install failure; reported by `mount` so plugin calls can chain.
    error: Option<BootstrapError>,
}

impl App {
    /// Creates an application whose pages read from `api`.
    pub fn new(api: TodoClient) -> Self {
        Self {
            ctx: AppContext {
                api,
                query: None,
                router: None,
                installed: Vec::new(),
                options: RenderOptions::default(),
            },
            error: None,
        }
    }

    /// Sets how pages format their output.
    pub fn render_options(mut self, options: RenderOptions) -> Self {
        self.ctx.options = options;
        self
    }

    /// Installs a plugin. Errors are deferred to [`App::mount`].
    pub fn use_plugin<P: Plugin>(mut self, plugin: P) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = plugin.name();
        match plugin.install(&mut self.ctx) {
            Ok(()) => {
                debug!(plugin = name, "plugin installed");
                self.ctx.installed.push(name);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Attaches the app to the host target matching `selector`.
    ///
    /// # Errors
    ///
    /// Fails if a plugin install failed, if the query or router plugin is
    /// missing, or if the host has no such target.
    pub fn mount(self, host: &mut dyn Host, selector: &str) -> Result<MountedApp, BootstrapError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let AppContext {
            api,
            query,
            router,
            installed,
            options,
        } = self.ctx;
        let query = query.ok_or(BootstrapError::MissingPlugin("query"))?;
        let router = router.ok_or(BootstrapError::MissingPlugin("router"))?;
        let target = host
            .find_target(selector)
            .ok_or_else(|| BootstrapError::MountTargetNotFound {
                selector: selector.to_string(),
            })?;

        info!(selector, plugins = ?installed, "app mounted");
        Ok(MountedApp {
            api,
            query,
            router,
            installed,
            options,
            target,
            history: History::new(),
        })
    }
}

/// Builds and mounts the application with the query cache and router, in that order.
pub fn bootstrap(
    host: &mut dyn Host,
    api: TodoClient,
    query: QueryClient,
    router: Router,
    options: RenderOptions,
) -> Result<MountedApp, BootstrapError> {
    App::new(api)
        .render_options(options)
        .use_plugin(query)
        .use_plugin(router)
        .mount(host, MOUNT_SELECTOR)
}

/// A mounted application.
pub struct MountedApp {
    api: TodoClient,
    query: QueryClient,
    router: Router,
    installed: Vec<&'static str>,
    options: RenderOptions,
    target: Box<dyn Write>,
    history: History,
}

impl MountedApp {
    pub fn api(&self) -> &TodoClient {
        &self.api
    }

    pub fn query(&self) -> &QueryClient {
        &self.query
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Plugin names in install order.
    pub fn plugins(&self) -> &[&'static str] {
        &self.installed
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Writes directly to the mount target.
    pub fn target(&mut self) -> &mut dyn Write {
        self.target.as_mut()
    }

    /// The route for the current history entry, if it matched one.
    pub fn current_route(&self) -> Option<&'static Route> {
        self.history
            .current()
            .and_then(|location| self.router.resolve(location))
    }

    /// Pushes `location` onto the history and renders its page.
    ///
    /// Returns the matched route, or `None` when no route matches; in that
    /// case nothing is rendered.
    pub async fn navigate(&mut self, location: &str) -> Result<Option<&'static Route>, RenderError> {
        self.history.push(location);
        self.render_current().await
    }

    /// Goes back one history entry and renders it. `Ok(None)` at the start of history.
    pub async fn back(&mut self) -> Result<Option<&'static Route>, RenderError> {
        if self.history.back().is_none() {
            return Ok(None);
        }
        self.render_current().await
    }

    /// Goes forward one history entry and renders it.
    pub async fn forward(&mut self) -> Result<Option<&'static Route>, RenderError> {
        if self.history.forward().is_none() {
            return Ok(None);
        }
        self.render_current().await
    }

    async fn render_current(&mut self) -> Result<Option<&'static Route>, RenderError> {
        let location = self.history.current().unwrap_or("/").to_string();
        let Some(route) = self.router.resolve(&location) else {
            warn!(%location, "no match found for location");
            return Ok(None);
        };

        debug!(%location, route = route.name, "rendering page");
        let ctx = PageContext {
            api: &self.api,
            query: &self.query,
            options: self.options,
        };
        route.page.render(&ctx, self.target.as_mut()).await?;
        Ok(Some(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Write target that tests can read back.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Host exposing one buffer under `#app`.
    #[derive(Default)]
    struct BufferHost {
        buffer: SharedBuffer,
    }

    impl Host for BufferHost {
        fn find_target(&mut self, selector: &str) -> Option<Box<dyn Write>> {
            (selector == MOUNT_SELECTOR).then(|| Box::new(self.buffer.clone()) as Box<dyn Write>)
        }
    }

    /// Host with no targets at all.
    struct EmptyHost;

    impl Host for EmptyHost {
        fn find_target(&mut self, _selector: &str) -> Option<Box<dyn Write>> {
            None
        }
    }

    fn api() -> TodoClient {
        TodoClient::new().unwrap()
    }

    async fn mounted_against(server: &MockServer, host: &mut BufferHost) -> MountedApp {
        let api = TodoClient::with_base_url(server.uri()).unwrap();
        bootstrap(
            host,
            api,
            QueryClient::new(),
            Router::default(),
            RenderOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_bootstrap_installs_plugins_in_order() {
        let mut host = BufferHost::default();
        let app = bootstrap(
            &mut host,
            api(),
            QueryClient::new(),
            Router::default(),
            RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(app.plugins(), &["query", "router"]);
        assert!(app.history().is_empty());
        assert!(app.current_route().is_none());
    }

    #[test]
    fn test_mount_fails_without_target() {
        let err = App::new(api())
            .use_plugin(QueryClient::new())
            .use_plugin(Router::default())
            .mount(&mut EmptyHost, MOUNT_SELECTOR)
            .err()
            .unwrap();
        assert!(matches!(err, BootstrapError::MountTargetNotFound { ref selector } if selector == "#app"));
    }

    #[test]
    fn test_mount_fails_for_unknown_selector() {
        let err = App::new(api())
            .use_plugin(QueryClient::new())
            .use_plugin(Router::default())
            .mount(&mut BufferHost::default(), "#root")
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "mount target '#root' not found");
    }

    #[test]
    fn test_mount_requires_router() {
        let err = App::new(api())
            .use_plugin(QueryClient::new())
            .mount(&mut BufferHost::default(), MOUNT_SELECTOR)
            .err()
            .unwrap();
        assert!(matches!(err, BootstrapError::MissingPlugin("router")));
    }

    #[test]
    fn test_mount_requires_query() {
        let err = App::new(api())
            .use_plugin(Router::default())
            .mount(&mut BufferHost::default(), MOUNT_SELECTOR)
            .err()
            .unwrap();
        assert!(matches!(err, BootstrapError::MissingPlugin("query")));
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let err = App::new(api())
            .use_plugin(QueryClient::new())
            .use_plugin(QueryClient::new())
            .use_plugin(Router::default())
            .mount(&mut BufferHost::default(), MOUNT_SELECTOR)
            .err()
            .unwrap();
        assert!(matches!(err, BootstrapError::DuplicatePlugin("query")));
    }

    #[test]
    fn test_terminal_host_only_knows_app_selector() {
        let mut host = TerminalHost;
        assert!(host.find_target(MOUNT_SELECTOR).is_some());
        assert!(host.find_target("body").is_none());
    }

    #[tokio::test]
    async fn test_navigate_home_renders_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "title": "buy milk"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut host = BufferHost::default();
        let mut app = mounted_against(&server, &mut host).await;

        let route = app.navigate("/").await.unwrap().unwrap();
        assert_eq!(route.name, "Home");
        assert!(host.buffer.contents().contains("buy milk"));
        assert_eq!(app.current_route().map(|r| r.name), Some("Home"));
    }

    #[tokio::test]
    async fn test_navigate_dashboard_renders_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "completed": true},
                {"id": 2, "completed": false}
            ])))
            .mount(&server)
            .await;

        let mut host = BufferHost::default();
        let mut app = mounted_against(&server, &mut host).await;

        let route = app.navigate("/dashboard").await.unwrap().unwrap();
        assert_eq!(route.name, "Dashboard");
        let out = host.buffer.contents();
        assert!(out.contains("Total      2"));
        assert!(out.contains("50%"));
    }

    #[tokio::test]
    async fn test_navigate_unknown_renders_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let mut host = BufferHost::default();
        let mut app = mounted_against(&server, &mut host).await;

        assert!(app.navigate("/nowhere").await.unwrap().is_none());
        assert!(host.buffer.contents().is_empty());
        assert_eq!(app.history().current(), Some("/nowhere"));
    }

    #[tokio::test]
    async fn test_navigate_propagates_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut host = BufferHost::default();
        let mut app = mounted_against(&server, &mut host).await;

        let err = app.navigate("/").await.unwrap_err();
        assert!(matches!(err, RenderError::Api(_)));
    }

    #[tokio::test]
    async fn test_back_and_forward_rerender() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut host = BufferHost::default();
        let mut app = mounted_against(&server, &mut host).await;

        app.navigate("/").await.unwrap();
        app.navigate("/dashboard").await.unwrap();

        let back = app.back().await.unwrap();
        assert_eq!(back.map(|r| r.name), Some("Home"));
        assert!(app.back().await.unwrap().is_none());

        let forward = app.forward().await.unwrap();
        assert_eq!(forward.map(|r| r.name), Some("Dashboard"));
    }
}
