use std::{collections::HashMap, fs, path::Path};

use anyhow::Context as _;

use crate::{assets, targets::PageTarget};

/// Emits one output page: reads the target's template, renders it, and writes
/// `<name>.html` into the destination dir. Production builds minify the
/// emitted markup.
pub fn emit_page(
    src_dir: &Path,
    dst_dir: &Path,
    target: &PageTarget<'_>,
    stylesheet: Option<&str>,
    bundles: &HashMap<String, String>,
    minify: bool,
) -> anyhow::Result<()> {
    let template_path = src_dir.join(&target.template_path);
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("failed to read template {}", template_path.display()))?;

    let html = render(&template, target, stylesheet, bundles);

    let content = if minify {
        minify_html::minify(html.as_bytes(), &minify_html::Cfg::new())
    } else {
        html.into_bytes()
    };

    let output_path = dst_dir.join(&target.output_filename);
    assets::write_file(&output_path, &content)?;

    log::info!("emit page: {}", target.output_filename.display());
    Ok(())
}

/// Renders a template for one page target.
///
/// Substitutes the `{{ title }}`, `{{ header }}` and `{{ footer }}` template
/// variables, then injects the stylesheet link and one script tag per
/// resolved bundle at the end of the document body. Bundle order is
/// preserved; a ref with no emitted file is left out (already warned about
/// during bundle emission).
pub fn render(
    template: &str,
    target: &PageTarget<'_>,
    stylesheet: Option<&str>,
    bundles: &HashMap<String, String>,
) -> String {
    let mut html = template.to_string();

    substitute(&mut html, "title", target.title);
    substitute(&mut html, "header", target.header.as_str());
    substitute(&mut html, "footer", target.footer.as_str());

    let mut tags = String::new();
    if let Some(stylesheet) = stylesheet {
        tags.push_str(&format!("<link rel=\"stylesheet\" href=\"./{stylesheet}\">\n"));
    }
    for bundle_ref in &target.bundle_refs {
        if let Some(rel_path) = bundles.get(bundle_ref) {
            tags.push_str(&format!("<script src=\"./{rel_path}\"></script>\n"));
        }
    }

    inject_before_body_end(&mut html, &tags);
    html
}

fn substitute(html: &mut String, variable: &str, value: &str) {
    for pattern in [format!("{{{{ {variable} }}}}"), format!("{{{{{variable}}}}}")] {
        if html.contains(&pattern) {
            *html = html.replace(&pattern, value);
        }
    }
}

fn inject_before_body_end(html: &mut String, tags: &str) {
    if tags.is_empty() {
        return;
    }

    if let Some(pos) = html.rfind("</body>") {
        html.insert_str(pos, tags);
    } else {
        log::warn!("template has no </body>, appending tags at the end");
        html.push_str(tags);
    }
}
