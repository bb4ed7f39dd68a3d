//! Component page and demo rendering.

use minijinja::context;
use serde::Serialize;
use serde_yaml::Mapping;

use swatch_spec::{render_implementation, render_markdown, ComponentSpec, SpecError, SpecFile};

use crate::beautify::beautify;
use crate::config::DocsConfig;
use crate::environment::DocsEnvironment;

/// Fields handed to the component page template.
#[derive(Debug, Serialize)]
struct ComponentPage<'a> {
    title: &'a str,
    description: String,
    implementation: String,
    demo: String,
    sample: &'a str,
}

/// A rendered page.
///
/// When the component template itself could not be rendered, the page is
/// still produced with an empty sample or demo and the cause is kept in
/// `fragment_error`.
#[derive(Debug)]
pub struct RenderedPage {
    /// Final HTML
    pub html: String,

    /// Why the inner fragment is missing, if it is
    pub fragment_error: Option<FragmentError>,
}

impl RenderedPage {
    /// Whether the page was rendered without its fragment.
    pub fn is_degraded(&self) -> bool {
        self.fragment_error.is_some()
    }
}

/// A component template that failed to render.
#[derive(Debug, thiserror::Error)]
#[error("Failed to render {template}: {source}")]
pub struct FragmentError {
    /// Template name
    pub template: String,

    #[source]
    pub source: minijinja::Error,
}

/// Errors that abort rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("Invalid spec {path}: {source}")]
    Spec {
        path: String,
        #[source]
        source: SpecError,
    },

    #[error("Failed to render {template}: {source}")]
    Template {
        template: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders component pages and demos through a shared environment.
pub struct ComponentRenderer<'a> {
    config: &'a DocsConfig,
    env: &'a DocsEnvironment,
}

impl<'a> ComponentRenderer<'a> {
    pub fn new(config: &'a DocsConfig, env: &'a DocsEnvironment) -> Self {
        Self { config, env }
    }

    /// Render the documentation page for a component spec.
    pub fn render_component(
        &self,
        content: &[u8],
        file: &SpecFile,
    ) -> Result<RenderedPage, DocsError> {
        let spec = self.load(content, file)?;
        if spec.is_empty() {
            tracing::warn!("{} sets no spec fields", file.path.display());
        }
        let locals = spec.locals(&self.config.html.base_uri);

        let (sample, fragment_error) = match self.render_fragment(file, &locals) {
            Ok(html) => (beautify(&html), None),
            Err(e) => {
                tracing::warn!("Rendering {} without sample: {}", file.path.display(), e);
                (String::new(), Some(e))
            }
        };

        let page = ComponentPage {
            title: spec.title.as_deref().unwrap_or_default(),
            description: render_markdown(spec.description.as_deref().unwrap_or_default()),
            implementation: render_implementation(
                spec.implementation.as_deref().unwrap_or_default(),
            ),
            demo: file.demo_file_name(),
            sample: &sample,
        };

        let html = self.render_layout(&self.config.docs.component_template, &page)?;

        Ok(RenderedPage {
            html,
            fragment_error,
        })
    }

    /// Render the live demo page for a component spec.
    pub fn render_component_demo(
        &self,
        content: &[u8],
        file: &SpecFile,
    ) -> Result<RenderedPage, DocsError> {
        let spec = self.load(content, file)?;
        let locals = spec.locals(&self.config.html.base_uri);

        let (demo, fragment_error) = match self.render_fragment(file, &locals) {
            Ok(markup) => (spec.demo_markup(&markup), None),
            Err(e) => {
                tracing::warn!("Rendering {} without demo: {}", file.path.display(), e);
                (String::new(), Some(e))
            }
        };

        let html = self.render_layout(
            &self.config.docs.preview_template,
            context! {
                baseUri => &self.config.html.base_uri,
                demo => demo,
            },
        )?;

        Ok(RenderedPage {
            html,
            fragment_error,
        })
    }

    fn load(&self, content: &[u8], file: &SpecFile) -> Result<ComponentSpec, DocsError> {
        ComponentSpec::from_slice(content).map_err(|source| DocsError::Spec {
            path: file.path.display().to_string(),
            source,
        })
    }

    /// Render the template that sits next to the spec file.
    fn render_fragment(&self, file: &SpecFile, locals: &Mapping) -> Result<String, FragmentError> {
        let template_path = file.template_path(&self.config.build.template_extension);
        let template = self.env.template_name(&template_path);

        tracing::debug!("Rendering {} for {}", template, file.path.display());

        self.env
            .render_file(&template_path, locals)
            .map_err(|source| FragmentError { template, source })
    }

    fn render_layout<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, DocsError> {
        self.env
            .render(template, ctx)
            .map_err(|source| DocsError::Template {
                template: template.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct Project {
        _temp: TempDir,
        config: DocsConfig,
    }

    impl Project {
        fn new() -> Self {
            let temp = tempdir().unwrap();
            let config = DocsConfig::default().resolve(temp.path());
            fs::create_dir_all(&config.docs.components_dir).unwrap();
            fs::create_dir_all(&config.docs.layout_dir).unwrap();
            Self {
                _temp: temp,
                config,
            }
        }

        fn layout(&self, name: &str, source: &str) {
            fs::write(self.config.docs.layout_dir.join(name), source).unwrap();
        }

        /// Write a component spec and, optionally, its template.
        fn component(&self, name: &str, spec: &str, template: Option<&str>) -> SpecFile {
            let dir = &self.config.docs.components_dir;
            let spec_path = dir.join(format!("{}.yml", name));
            fs::create_dir_all(spec_path.parent().unwrap()).unwrap();
            fs::write(&spec_path, spec).unwrap();
            if let Some(template) = template {
                fs::write(dir.join(format!("{}.njk", name)), template).unwrap();
            }
            SpecFile::new(spec_path)
        }
    }

    fn render_page(project: &Project, file: &SpecFile) -> RenderedPage {
        let env = DocsEnvironment::new(&project.config);
        let content = fs::read(&file.path).unwrap();
        ComponentRenderer::new(&project.config, &env)
            .render_component(&content, file)
            .unwrap()
    }

    fn render_demo(project: &Project, file: &SpecFile) -> RenderedPage {
        let env = DocsEnvironment::new(&project.config);
        let content = fs::read(&file.path).unwrap();
        ComponentRenderer::new(&project.config, &env)
            .render_component_demo(&content, file)
            .unwrap()
    }

    const FIELDS_LAYOUT: &str =
        "title={{ title }}\ndescription={{ description }}\nimplementation={{ implementation }}\ndemo={{ demo }}\nsample={{ sample }}";

    #[test]
    fn renders_component_fields() {
        let project = Project::new();
        project.layout("component.njk", FIELDS_LAYOUT);
        let file = project.component(
            "buttons/primary",
            r#"
title: Primary button
description: A *bold* call to action
implementation: |
  | class | use |
  |-------|-----|
  | .btn  | base |
data:
  label: Save
"#,
            Some("<button class=\"btn\">{{ label }}</button>"),
        );

        let page = render_page(&project, &file);

        assert!(!page.is_degraded());
        assert!(page.html.contains("title=Primary button"));
        assert!(page
            .html
            .contains("description=<p>A <em>bold</em> call to action</p>"));
        assert!(page.html.contains("<table class=\"table\">"));
        assert!(page.html.contains("demo=primary.demo.html"));
        assert!(page
            .html
            .contains("sample=<button class=\"btn\">Save</button>"));
    }

    #[test]
    fn sample_sees_base_uri() {
        let mut project = Project::new();
        project.config.html.base_uri = "/kit/".to_string();
        project.layout("component.njk", "{{ sample }}");
        let file = project.component(
            "icon",
            "title: Icon",
            Some("<img src=\"{{ baseUri }}icon.svg\">"),
        );

        let page = render_page(&project, &file);

        assert_eq!(page.html, "<img src=\"/kit/icon.svg\">");
    }

    #[test]
    fn sample_is_beautified() {
        let project = Project::new();
        project.layout("component.njk", "{{ sample }}");
        let file = project.component("list", "title: List", Some("<ul><li>One</li></ul>"));

        let page = render_page(&project, &file);

        assert_eq!(page.html, "<ul>\n    <li>\n        One\n    </li>\n</ul>");
    }

    #[test]
    fn missing_template_degrades_to_empty_sample() {
        let project = Project::new();
        project.layout("component.njk", FIELDS_LAYOUT);
        let file = project.component(
            "ghost",
            "title: Ghost\ndescription: Still documented",
            None,
        );

        let page = render_page(&project, &file);

        assert!(page.is_degraded());
        assert!(page.html.contains("title=Ghost"));
        assert!(page.html.contains("<p>Still documented</p>"));
        assert!(page.html.ends_with("sample="));

        let error = page.fragment_error.unwrap();
        assert_eq!(error.template, "ghost.njk");
        assert_eq!(
            error.source.kind(),
            minijinja::ErrorKind::TemplateNotFound
        );
    }

    #[test]
    fn broken_template_degrades_to_empty_sample() {
        let project = Project::new();
        project.layout("component.njk", "[{{ sample }}]");
        let file = project.component("broken", "title: Broken", Some("{% if %}"));

        let page = render_page(&project, &file);

        assert!(page.is_degraded());
        assert_eq!(page.html, "[]");
    }

    #[test]
    fn uses_builtin_component_layout() {
        let project = Project::new();
        let file = project.component(
            "badge",
            "title: Badge\ndescription: Small count",
            Some("<span class=\"badge\">3</span>"),
        );

        let page = render_page(&project, &file);

        assert!(page.html.contains("<h1 class=\"component-title\">Badge</h1>"));
        assert!(page.html.contains("<p>Small count</p>"));
        assert!(page
            .html
            .contains("&lt;span class=&quot;badge&quot;&gt;3"));
        assert!(page.html.contains("src=\"badge.demo.html\""));
    }

    #[test]
    fn invalid_spec_is_an_error() {
        let project = Project::new();
        let env = DocsEnvironment::new(&project.config);
        let renderer = ComponentRenderer::new(&project.config, &env);
        let file = SpecFile::new(Path::new("nothing.yml"));

        let scalar = renderer.render_component(b"42", &file);
        assert!(matches!(scalar, Err(DocsError::Spec { .. })));

        let broken = renderer.render_component_demo(b"title: [", &file);
        assert!(matches!(broken, Err(DocsError::Spec { .. })));
    }

    #[test]
    fn missing_layout_is_an_error() {
        let mut project = Project::new();
        project.config.docs.component_template = "absent.njk".to_string();
        let env = DocsEnvironment::new(&project.config);
        let file = project.component("plain", "title: Plain", Some("<p>x</p>"));

        let result = ComponentRenderer::new(&project.config, &env)
            .render_component(b"title: Plain", &file);

        assert!(matches!(
            result,
            Err(DocsError::Template { ref template, .. }) if template == "absent.njk"
        ));
    }

    #[test]
    fn demo_replaces_every_placeholder() {
        let project = Project::new();
        project.layout("preview.njk", "{{ demo }}");
        let file = project.component(
            "tag",
            "title: Tag\ndemo: <div>{}</div><div>{}</div>",
            Some("X"),
        );

        let page = render_demo(&project, &file);

        assert_eq!(page.html, "<div>X</div><div>X</div>");
    }

    #[test]
    fn demo_without_wrapper_is_bare_markup() {
        let project = Project::new();
        project.layout("preview.njk", "{{ baseUri }}|{{ demo }}");
        let file = project.component(
            "chip",
            "data:\n  text: Hello",
            Some("<span>{{ text }}</span>"),
        );

        let page = render_demo(&project, &file);

        assert_eq!(page.html, "/|<span>Hello</span>");
    }

    #[test]
    fn failed_demo_is_empty() {
        let project = Project::new();
        project.layout("preview.njk", "[{{ demo }}]");
        let file = project.component("gone", "demo: <div>{}</div>", None);

        let page = render_demo(&project, &file);

        assert!(page.is_degraded());
        assert_eq!(page.html, "[]");
    }

    #[test]
    fn sibling_template_wins_over_same_name_in_index_dir() {
        let project = Project::new();
        project.layout("preview.njk", "{{ demo }}");
        let file = project.component("buttons/primary", "title: Primary", Some("sibling"));
        let shadow = project.config.docs.index_dir.join("buttons/primary.njk");
        fs::create_dir_all(shadow.parent().unwrap()).unwrap();
        fs::write(&shadow, "shadow").unwrap();

        let page = render_demo(&project, &file);

        assert!(!page.is_degraded());
        assert_eq!(page.html, "sibling");
    }

    #[test]
    fn sequence_spec_renders_with_defaults() {
        let project = Project::new();
        project.layout("component.njk", "[{{ title }}]{{ sample }}");
        project.layout("preview.njk", "{{ demo }}");
        let file = project.component("lists/seq", "- a\n- b", Some("<i>{{ baseUri }}</i>"));

        let page = render_page(&project, &file);
        assert!(!page.is_degraded());
        assert_eq!(page.html, "[]<i>/</i>");

        let demo = render_demo(&project, &file);
        assert_eq!(demo.html, "<i>/</i>");
    }

    #[test]
    fn shared_environment_renders_many_components() {
        let project = Project::new();
        project.layout("preview.njk", "{{ demo }}");
        let first = project.component("a", "title: A", Some("first"));
        let second = project.component("b", "title: B", Some("second"));

        let env = DocsEnvironment::new(&project.config);
        let renderer = ComponentRenderer::new(&project.config, &env);

        let a = renderer
            .render_component_demo(&fs::read(&first.path).unwrap(), &first)
            .unwrap();
        let b = renderer
            .render_component_demo(&fs::read(&second.path).unwrap(), &second)
            .unwrap();

        assert_eq!(a.html, "first");
        assert_eq!(b.html, "second");
    }
}
