use std::fmt::Write;

use crate::config::ModuleConfig;

/// File name of the rendered Apache directives block.
pub const DISPATCHER_CONF: &str = "dispatcher.conf";

/// File name of the farm include aggregator.
pub const FARMS_ANY: &str = "dispatcher.farms.any";

const fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}

/// Renders the `dispatcher.conf` Apache module directives block.
#[must_use]
pub fn render_dispatcher_conf(module: &ModuleConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<IfModule disp_apache2.c>");
    let _ = writeln!(
        out,
        "  DispatcherConfig {}/{FARMS_ANY}",
        module.farms_path.trim_end_matches('/')
    );
    let _ = writeln!(out, "  DispatcherLog {}", module.log_file);
    let _ = writeln!(out, "  DispatcherLogLevel {}", module.log_level.as_str());
    let _ = writeln!(out, "  DispatcherDeclineRoot {}", on_off(module.decline_root));
    let _ = writeln!(
        out,
        "  DispatcherUseProcessedURL {}",
        on_off(module.use_processed_url)
    );
    let _ = writeln!(out, "  DispatcherPassError {}", module.pass_error);
    if let Some(timeout) = module.keep_alive_timeout {
        let _ = writeln!(out, "  DispatcherKeepAliveTimeout {timeout}");
    }
    if let Some(no_canon_url) = module.no_canon_url {
        let _ = writeln!(out, "  DispatcherNoCanonURL {}", on_off(no_canon_url));
    }
    let _ = writeln!(out, "</IfModule>");
    out
}

/// Renders `dispatcher.farms.any`, which pulls in every farm include file.
#[must_use]
pub fn render_farms_include() -> String {
    "/farms {\n  $include \"dispatcher.*.inc.any\"\n}\n".to_string()
}

#[cfg(test)]
#[path = "apache_tests.rs"]
mod tests;
