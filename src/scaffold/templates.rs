//! Text of the files that make up a generated project.

use serde_json::json;

use crate::config::ScaffoldConfig;
use crate::translate::RenderedComponent;

pub fn package_json(cfg: &ScaffoldConfig) -> String {
    let manifest = json!({
        "name": cfg.project_name,
        "version": "1.0.0",
        "private": true,
        "dependencies": {
            "react": cfg.react_version,
            "react-dom": cfg.react_dom_version,
            "react-scripts": cfg.react_scripts_version,
        },
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build",
        },
        "browserslist": {
            "production": [">0.2%", "not dead", "not op_mini all"],
            "development": ["last 1 chrome version", "last 1 firefox version", "last 1 safari version"],
        },
    });
    let mut text = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    text.push('\n');
    text
}

pub fn react_index_html(cfg: &ScaffoldConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
  </head>
  <body>
    <noscript>You need to enable JavaScript to run this app.</noscript>
    <div id="root"></div>
  </body>
</html>
"#,
        title = escape_html(&cfg.title)
    )
}

pub fn react_index_js(component_name: &str) -> String {
    format!(
        r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import {component_name} from './components/{component_name}';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <{component_name} />
  </React.StrictMode>
);
"#
    )
}

pub fn react_component(component_name: &str, rendered: &RenderedComponent) -> String {
    format!(
        r#"import React from 'react';
import './{component_name}.css';

const {component_name} = () => {{
  return (
{markup}
  );
}};

export default {component_name};
"#,
        markup = rendered.render_markup(2)
    )
}

pub fn html_page(cfg: &ScaffoldConfig, rendered: &RenderedComponent) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <link rel="stylesheet" href="styles.css" />
  </head>
  <body>
{markup}
  </body>
</html>
"#,
        title = escape_html(&cfg.title),
        markup = rendered.render_markup(2)
    )
}

/// Stylesheet with a reset for the page body.
pub fn stylesheet(rendered: &RenderedComponent) -> String {
    let mut css = String::from(
        "*, *::before, *::after {\n  box-sizing: border-box;\n}\n\nbody {\n  margin: 0;\n}\n",
    );
    let rules = rendered.css();
    if !rules.is_empty() {
        css.push('\n');
        css.push_str(&rules);
    }
    css
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
