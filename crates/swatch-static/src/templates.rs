//! Built-in layout templates.
//!
//! Used when a project does not ship its own `component`, `preview` or
//! `index` template, and written to disk by `swatch init`.

/// Name of the built-in component page template.
pub const COMPONENT: &str = "component.njk";

/// Name of the built-in demo preview template.
pub const PREVIEW: &str = "preview.njk";

/// Name of the built-in index template.
pub const INDEX: &str = "index.njk";

/// Look up a built-in template by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        COMPONENT => Some(COMPONENT_TEMPLATE),
        PREVIEW => Some(PREVIEW_TEMPLATE),
        INDEX => Some(INDEX_TEMPLATE),
        _ => None,
    }
}

/// All built-in templates as `(name, source)` pairs.
pub fn all() -> [(&'static str, &'static str); 3] {
    [
        (COMPONENT, COMPONENT_TEMPLATE),
        (PREVIEW, PREVIEW_TEMPLATE),
        (INDEX, INDEX_TEMPLATE),
    ]
}

const COMPONENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="{{ baseUri }}assets/docs.css">
</head>
<body>
  <article class="component">
    <h1 class="component-title">{{ title }}</h1>
    <section class="component-description">
      {{ description | safe }}
    </section>
    <section class="component-demo">
      <iframe src="{{ demo }}" title="{{ title }} demo"></iframe>
      <a href="{{ demo }}" target="_blank">Open demo</a>
    </section>
    {% if sample %}
    <section class="component-sample">
      <pre><code class="language-html">{{ sample | escape }}</code></pre>
    </section>
    {% endif %}
    <section class="component-implementation">
      {{ implementation | safe }}
    </section>
  </article>
</body>
</html>"##;

const PREVIEW_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="{{ baseUri }}assets/main.css">
</head>
<body class="preview">
{{ demo | safe }}
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Components</title>
  <link rel="stylesheet" href="{{ baseUri }}assets/docs.css">
</head>
<body>
  <nav class="docs-nav">
    <h2>Components</h2>
    {% for group, entry in components | items %}
    <h3>{{ group | label }}</h3>
    <ul>
      {% for variation in entry.variations %}
      <li><a href="{{ variation.url | replace("." ~ templateExtension, ".html") }}">{{ variation.name }}</a></li>
      {% endfor %}
    </ul>
    {% endfor %}

    <h2>Templates</h2>
    {% for group, entry in templates | items %}
    <h3>{{ group }}</h3>
    <ul>
      {% for variation in entry.variations %}
      <li>{{ variation.name }}</li>
      {% endfor %}
    </ul>
    {% endfor %}
  </nav>
</body>
</html>"##;
