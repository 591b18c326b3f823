use std::path::Path;

use crate::utils::dotted_extension;

/// Extension -> display language. Used for the "by file type" statistics only.
pub const LANGUAGE_TABLE: &[(&str, &str)] = &[
    (".ts", "TypeScript"),
    (".tsx", "React TSX"),
    (".js", "JavaScript"),
    (".jsx", "React JSX"),
    (".java", "Java"),
    (".py", "Python"),
    (".css", "CSS"),
    (".scss", "SCSS"),
    (".html", "HTML"),
    (".json", "JSON"),
    (".yaml", "YAML"),
    (".yml", "YAML"),
    (".xml", "XML"),
    (".md", "Markdown"),
    (".sql", "SQL"),
    (".sh", "Shell"),
    (".env", "Environment"),
    (".properties", "Properties"),
    (".gradle", "Gradle"),
    (".toml", "TOML"),
    (".cfg", "Config"),
    (".log", "Log"),
    (".txt", "Text"),
    (".ini", "INI"),
    (".conf", "Config"),
    (".bat", "Batch"),
    (".ps1", "PowerShell"),
];

pub fn language_for(path: &Path) -> String {
    let ext = dotted_extension(path);
    if ext.is_empty() {
        return "Unknown".into();
    }
    LANGUAGE_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| (*lang).to_string())
        .unwrap_or_else(|| ext.trim_start_matches('.').to_uppercase())
}
