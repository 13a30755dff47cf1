//! WiX authoring template rendering.
//!
//! The installer's product authoring (Product.wxs) is a handlebars template
//! populated with the resolved settings. The harvested file components come
//! from a separate fragment produced by `heat`, referenced here as the
//! `AppFiles` component group.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use uuid::Uuid;

use crate::bundler::error::Result;
use crate::bundler::settings::Settings;

/// Built-in product authoring template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../../templates/main.wxs");

/// Values exposed to the authoring template.
#[derive(Debug, Serialize)]
struct WxsContext {
    product_name: String,
    manufacturer: String,
    description: String,
    version: String,
    product_code: String,
    upgrade_code: String,
    install_dir_xml: String,
    add_to_path: bool,
    path_component_guid: String,
    license_rtf: Option<String>,
}

/// Renders the product authoring from `template_source`.
///
/// `license_rtf` points at the staged rich-text license file, when one was
/// produced; without it the template omits the license dialog override.
pub fn render(
    settings: &Settings,
    template_source: &str,
    license_rtf: Option<&Path>,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_template_string("product", template_source)?;

    let (root_id, components) = split_target_dir(&settings.initial_target_dir(), settings);

    let context = WxsContext {
        product_name: settings.product_name().to_string(),
        manufacturer: settings.manufacturer(),
        description: settings.description().to_string(),
        version: settings.product_version(),
        product_code: guid(settings.product_code()),
        upgrade_code: guid(settings.upgrade_code()),
        install_dir_xml: directory_fragment(&root_id, &components),
        add_to_path: settings.msi().add_to_path,
        // Stable per product so repairs and upgrades agree on the component.
        path_component_guid: guid(Uuid::new_v5(&settings.upgrade_code(), b"path-component")),
        license_rtf: license_rtf.map(|p| p.display().to_string()),
    };

    Ok(handlebars.render("product", &context)?)
}

/// Formats a GUID the way WiX authoring expects it.
fn guid(value: Uuid) -> String {
    value
        .hyphenated()
        .encode_upper(&mut Uuid::encode_buffer())
        .to_string()
}

/// Splits an installer target path into its root folder property and the
/// folder names below it.
///
/// `[ProgramFiles64Folder]\Acme\Widget` becomes
/// `("ProgramFiles64Folder", ["Acme", "Widget"])`. A path without a
/// bracketed root falls back to the architecture's Program Files folder.
/// An empty remainder gets the product name, so the install directory is
/// never a predefined system folder itself.
fn split_target_dir(dir: &str, settings: &Settings) -> (String, Vec<String>) {
    let (root, rest) = match dir.strip_prefix('[').and_then(|s| s.split_once(']')) {
        Some((root, rest)) => (root.to_string(), rest),
        None => (settings.arch().program_files_folder().to_string(), dir),
    };

    let mut components: Vec<String> = rest
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect();

    if components.is_empty() {
        components.push(settings.product_name().to_string());
    }

    (root, components)
}

/// Builds the nested `<Directory>` authoring for the install path.
///
/// The innermost directory is always `INSTALLDIR`, which the harvested
/// fragment and the installer UI both reference.
fn directory_fragment(root_id: &str, components: &[String]) -> String {
    let Some((last, intermediate)) = components.split_last() else {
        return format!("<Directory Id=\"{}\" />", xml_escape(root_id));
    };

    let mut xml = format!("<Directory Id=\"{}\">", xml_escape(root_id));
    for (index, name) in intermediate.iter().enumerate() {
        xml.push_str(&format!(
            "<Directory Id=\"InstallDir{}\" Name=\"{}\">",
            index,
            xml_escape(name)
        ));
    }
    xml.push_str(&format!(
        "<Directory Id=\"INSTALLDIR\" Name=\"{}\" />",
        xml_escape(last)
    ));

    for _ in intermediate {
        xml.push_str("</Directory>");
    }
    xml.push_str("</Directory>");
    xml
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
