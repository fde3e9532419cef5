// build.rs

// Compiles `locales/<lang>.toml` into the `t!` macro used for user-facing strings.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_LOCALE: &str = "locales/en.toml";

fn main() {
    // A `lang_*` feature wins over `VN_LANG`; English is the default.
    let mut feature_langs: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    feature_langs.sort();

    let lang = match feature_langs.first() {
        Some(first) => {
            if feature_langs.len() > 1 {
                println!(
                    "cargo:warning=Multiple language features enabled ({:?}). Using '{}'.",
                    feature_langs, first
                );
            }
            first.clone()
        }
        None => env::var("VN_LANG").unwrap_or_else(|_| "en".to_string()),
    };

    println!("cargo:rustc-env=VN_LANG_EFFECTIVE={}", lang);
    println!("cargo:rerun-if-env-changed=VN_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let fallback = fs::read_to_string(FALLBACK_LOCALE)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", FALLBACK_LOCALE, e));
    let mut translations: BTreeMap<String, String> = toml::from_str(&fallback)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", FALLBACK_LOCALE, e));

    if lang != "en" {
        let lang_path = format!("locales/{}.toml", lang);
        match fs::read_to_string(&lang_path) {
            Ok(content) => {
                let overrides: BTreeMap<String, String> = toml::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", lang_path, e));
                translations.extend(overrides);
            }
            Err(_) => println!(
                "cargo:warning=Language file '{}' not found. Falling back to 'en'.",
                lang_path
            ),
        }
    }

    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, value) in &translations {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        code.push_str(&format!("    (\"{}\") => {{ \"{}\" }};\n", key, escaped));
    }
    // Unknown keys fail at compile time.
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    code.push('}');

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("translations.rs"), code)
        .expect("Failed to write generated translations");
}
