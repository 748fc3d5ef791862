//! HTML shell rendering, executed once at startup.

use crate::error::{RedocupError, Result};
use crate::state::ServerConfig;

/// The bundled HTML shell template.
#[derive(rust_embed::Embed)]
#[folder = "assets"]
#[include = "index.html"]
struct Templates;

/// Render the HTML shell against the configured spec path.
///
/// The template variable receives the raw file-system path; the shipped
/// template fetches the spec from the `/spec.json` route and only shows
/// the path in the page title. A missing or broken template is fatal,
/// unlike per-request spec failures.
pub fn load_html(config: &ServerConfig) -> Result<String> {
    let template = Templates::get("index.html").ok_or(RedocupError::TemplateMissing)?;
    let source = String::from_utf8_lossy(&template.data);

    let mut env = minijinja::Environment::new();
    let tmpl = env.template_from_str(&source)?;
    let html = tmpl.render(minijinja::context! {
        spec => config.spec_path.display().to_string(),
    })?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn shell_references_spec_route() {
        let config = ServerConfig {
            spec_path: PathBuf::from("api/petstore.yaml"),
            port: 5000,
            watch: false,
        };
        let html = load_html(&config).unwrap();
        assert!(html.contains("/spec.json"));
        assert!(html.contains("/assets/redoc/"));
    }

    #[test]
    fn shell_carries_spec_path_in_title() {
        let config = ServerConfig {
            spec_path: PathBuf::from("api/petstore.yaml"),
            port: 5000,
            watch: false,
        };
        let html = load_html(&config).unwrap();
        assert!(html.contains("api/petstore.yaml"));
    }
}
