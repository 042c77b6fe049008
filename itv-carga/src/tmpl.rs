//! Templating engine stuff.

use serde::ser::Serialize;
use serde_derive::Serialize;
use std::borrow::Cow;
use handlebars::Handlebars;
use log::*;

use crate::errors::*;

#[derive(Serialize)]
pub struct TemplateContext<'a, T> where T: Serialize {
    pub template: &'static str,
    pub title: Cow<'a, str>,
    pub body: T
}
impl<'a, T> TemplateContext<'a, T> where T: Serialize {
    pub fn render(self, hbs: &Handlebars) -> CargaResult<String> {
        match hbs.render(self.template, &self) {
            Ok(d) => Ok(d),
            Err(e) => {
                warn!("Failed to render template {}: {}", self.template, e);
                Err(e)?
            }
        }
    }
}
impl<'a, T> TemplateContext<'a, T> where T: Serialize {
    /// A fragment with no page title.
    pub fn fragment(template: &'static str, body: T) -> Self {
        TemplateContext {
            template,
            title: "".into(),
            body
        }
    }
}
struct Template {
    name: &'static str,
    content: &'static str
}
macro_rules! template {
    ($name:expr) => {
        Template {
            name: $name,
            content: include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name, ".html.hbs"))
        }
    }
}

static TEMPLATES: [Template; 3] = [
    template!("message"),
    template!("page"),
    template!("summary")
];
pub fn handlebars_init() -> Result<Handlebars> {
    let mut hbs = Handlebars::new();
    hbs.set_strict_mode(true);
    for t in TEMPLATES.iter() {
        hbs.register_template_string(t.name, t.content)?;
    }
    Ok(hbs)
}
