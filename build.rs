fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=secrets.local.rs");
    emit_local_secrets();
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}

/// Promote constants from an untracked `secrets.local.rs` to rustc env
/// vars so WiFi credentials and the upload endpoint never land in git.
fn emit_local_secrets() {
    let Ok(src) = std::fs::read_to_string("secrets.local.rs") else {
        return;
    };

    for (name, env) in [
        ("WIFI_SSID", "LOCAL_WIFI_SSID"),
        ("WIFI_PASS", "LOCAL_WIFI_PASS"),
        ("SERVER_URL", "LOCAL_SERVER_URL"),
    ] {
        if let Some(v) = extract_str_const(&src, name) {
            println!("cargo:rustc-env={}={}", env, v);
        }
    }
}

fn extract_str_const(src: &str, name: &str) -> Option<String> {
    let needle = format!("pub const {}", name);
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || !trimmed.starts_with(&needle) {
            continue;
        }
        let start = trimmed.find('"')?;
        let end = trimmed[start + 1..].find('"')? + start + 1;
        return Some(trimmed[start + 1..end].to_string());
    }
    None
}
