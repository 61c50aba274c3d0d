//! Farm stanza renderers and the fixed-order assembler.
//!
//! Every function here is a pure mapping from one validated sub-structure to
//! text. Stanzas appear in the numeric order the dispatcher expects; rule
//! lists keep their input order and get contiguous `/0000`-style keys.

use std::fmt::Write;

use crate::config::{Farm, Filter, FilterPattern, StickyConnections};

use super::any::{AnyWriter, quote_pattern, rule_type, sequence_key, write_glob_rules};

/// Include file name: `dispatcher.{priority:02}-{name}.inc.any`.
#[must_use]
pub fn farm_file_name(name: &str, priority: u32) -> String {
    format!("dispatcher.{priority:02}-{name}.inc.any")
}

/// Renders one complete farm include file.
#[must_use]
pub fn render_farm(name: &str, farm: &Farm) -> String {
    let mut writer = AnyWriter::new();
    writer.open(name);
    write_clientheaders(&mut writer, farm);
    write_virtualhosts(&mut writer, name, farm);
    write_sessionmanagement(&mut writer, farm);
    write_renders(&mut writer, farm);
    write_filter(&mut writer, farm);
    write_vanity_urls(&mut writer, farm);
    if farm.propagate_synd_post {
        writer.flag("propagateSyndPost", true);
    }
    write_cache(&mut writer, farm);
    write_auth_checker(&mut writer, farm);
    write_statistics(&mut writer, farm);
    write_sticky_connections(&mut writer, farm);
    if let Some(health_check) = &farm.health_check {
        writer.scalar("health_check", health_check);
    }
    if let Some(retry_delay) = farm.retry_delay {
        writer.scalar("retryDelay", &retry_delay.to_string());
    }
    if let Some(retries) = farm.number_of_retries {
        writer.scalar("numberOfRetries", &retries.to_string());
    }
    if let Some(penalty) = farm.unavailable_penalty {
        writer.scalar("unavailablePenalty", &penalty.to_string());
    }
    if farm.failover {
        writer.flag("failover", true);
    }
    writer.close();
    writer.finish()
}

fn write_clientheaders(writer: &mut AnyWriter, farm: &Farm) {
    if farm.clientheaders.is_empty() {
        return;
    }
    writer.open("clientheaders");
    for header in &farm.clientheaders {
        writer.quoted_item(header);
    }
    writer.close();
}

fn write_virtualhosts(writer: &mut AnyWriter, name: &str, farm: &Farm) {
    writer.open("virtualhosts");
    if farm.virtualhosts.is_empty() {
        // A farm with no explicit hosts serves its own name.
        writer.quoted_item(name);
    } else {
        for host in &farm.virtualhosts {
            writer.quoted_item(host);
        }
    }
    writer.close();
}

fn write_sessionmanagement(writer: &mut AnyWriter, farm: &Farm) {
    let Some(session) = &farm.sessionmanagement else {
        return;
    };
    writer.open("sessionmanagement");
    writer.scalar("directory", &session.directory);
    if let Some(encode) = &session.encode {
        writer.scalar("encode", encode);
    }
    if let Some(header) = &session.header {
        writer.scalar("header", header);
    }
    if let Some(timeout) = session.timeout {
        writer.scalar("timeout", &timeout.to_string());
    }
    writer.close();
}

fn write_renders(writer: &mut AnyWriter, farm: &Farm) {
    writer.open("renders");
    for (index, renderer) in farm.renderers.iter().enumerate() {
        writer.open(&format!("renderer{index}"));
        writer.scalar("hostname", &renderer.hostname);
        writer.scalar("port", &renderer.port.to_string());
        if let Some(timeout) = renderer.timeout {
            writer.scalar("timeout", &timeout.to_string());
        }
        if let Some(receive_timeout) = renderer.receive_timeout {
            writer.scalar("receiveTimeout", &receive_timeout.to_string());
        }
        if let Some(ipv4) = renderer.ipv4 {
            writer.flag("ipv4", ipv4);
        }
        if let Some(secure) = renderer.secure {
            writer.flag("secure", secure);
        } else if farm.secure {
            // Hardened farms talk TLS to their renderers unless overridden.
            writer.flag("secure", true);
        }
        if let Some(always_resolve) = renderer.always_resolve {
            writer.flag("always-resolve", always_resolve);
        }
        writer.close();
    }
    writer.close();
}

fn write_filter(writer: &mut AnyWriter, farm: &Farm) {
    writer.open("filter");
    let mut index = 0;
    if farm.secure {
        write_filter_entry(writer, index, &Filter::deny_all());
        index += 1;
    }
    for filter in &farm.filters {
        write_filter_entry(writer, index, filter);
        index += 1;
    }
    if farm.secure {
        for filter in secure_filters() {
            write_filter_entry(writer, index, &filter);
            index += 1;
        }
    }
    writer.close();
}

fn write_filter_entry(writer: &mut AnyWriter, index: usize, filter: &Filter) {
    let mut entry = String::new();
    let _ = write!(
        entry,
        "/{} {{ /type \"{}\"",
        sequence_key(index),
        rule_type(filter.allow)
    );
    // Fixed emission order of the dispatcher grammar.
    let fields: [(&str, &Option<FilterPattern>); 8] = [
        ("method", &filter.method),
        ("query", &filter.query),
        ("protocol", &filter.protocol),
        ("path", &filter.path),
        ("selectors", &filter.selectors),
        ("extension", &filter.extension),
        ("suffix", &filter.suffix),
        ("url", &filter.url),
    ];
    for (field, pattern) in fields {
        if let Some(pattern) = pattern {
            let _ = write!(entry, " /{field} {}", quote_pattern(pattern));
        }
    }
    entry.push_str(" }");
    writer.line(&entry);
}

/// Hardening filters appended after the caller's filters when `secure` is set:
/// deny the CRX, OSGi and code trees, content-grabbing selectors, debug query
/// switches, and raw JSP requests.
fn secure_filters() -> Vec<Filter> {
    let deny_url = |pattern: &str| Filter {
        allow: false,
        url: Some(FilterPattern::glob(pattern)),
        ..Filter::default()
    };
    let deny_query = |query: &str| Filter {
        allow: false,
        method: Some(FilterPattern::glob("GET")),
        query: Some(FilterPattern::glob(query)),
        ..Filter::default()
    };
    vec![
        deny_url("/crx/*"),
        deny_url("/system/*"),
        deny_url("/apps/*"),
        Filter {
            allow: false,
            selectors: Some(FilterPattern::regex(
                "(feed|rss|pages|languages|blueprint|infinity|tidy|sysview|docview|query|[0-9-]+|jcr:content)",
            )),
            extension: Some(FilterPattern::regex("(json|xml|html|feed)")),
            ..Filter::default()
        },
        deny_query("debug=*"),
        deny_query("wcmmode=*"),
        Filter {
            allow: false,
            extension: Some(FilterPattern::glob("jsp")),
            ..Filter::default()
        },
    ]
}

fn write_vanity_urls(writer: &mut AnyWriter, farm: &Farm) {
    let Some(vanity_urls) = &farm.vanity_urls else {
        return;
    };
    writer.open("vanity_urls");
    writer.scalar("url", &vanity_urls.url);
    writer.scalar("file", &vanity_urls.file);
    writer.bare("delay", vanity_urls.delay);
    writer.close();
}

fn write_cache(writer: &mut AnyWriter, farm: &Farm) {
    let Some(cache) = &farm.cache else {
        return;
    };
    writer.open("cache");
    writer.scalar("docroot", &cache.docroot);
    if let Some(statfile) = &cache.statfile {
        writer.scalar("statfile", statfile);
    }
    if let Some(serve_stale) = cache.serve_stale_on_error {
        writer.flag("serveStaleOnError", serve_stale);
    }
    if let Some(allow_authorized) = cache.allow_authorized {
        writer.flag("allowAuthorized", allow_authorized);
    }
    write_glob_rules(writer, "rules", &cache.rules);
    if let Some(statfileslevel) = cache.statfileslevel {
        writer.scalar("statfileslevel", &statfileslevel.to_string());
    }
    if !cache.invalidate.is_empty() {
        write_glob_rules(writer, "invalidate", &cache.invalidate);
    }
    if let Some(handler) = &cache.invalidate_handler {
        writer.scalar("invalidateHandler", handler);
    }
    if farm.secure {
        // Hardened farms refuse flushes from anywhere but explicit clients.
        let mut clients = vec![crate::config::GlobRule::new(0, "*", false)];
        clients.extend(cache.allowed_clients.iter().cloned());
        write_glob_rules(writer, "allowedClients", &clients);
    } else {
        write_glob_rules(writer, "allowedClients", &cache.allowed_clients);
    }
    if !cache.ignore_url_params.is_empty() {
        write_glob_rules(writer, "ignoreUrlParams", &cache.ignore_url_params);
    }
    if !cache.headers.is_empty() {
        writer.open("headers");
        for header in &cache.headers {
            writer.quoted_item(header);
        }
        writer.close();
    }
    if let Some(mode) = &cache.mode {
        writer.scalar("mode", mode);
    }
    if let Some(grace_period) = cache.grace_period {
        writer.scalar("gracePeriod", &grace_period.to_string());
    }
    if let Some(enable_ttl) = cache.enable_ttl {
        writer.flag("enableTTL", enable_ttl);
    }
    writer.close();
}

fn write_auth_checker(writer: &mut AnyWriter, farm: &Farm) {
    let Some(auth_checker) = &farm.auth_checker else {
        return;
    };
    writer.open("auth_checker");
    writer.scalar("url", &auth_checker.url);
    write_glob_rules(writer, "filter", &auth_checker.filters);
    write_glob_rules(writer, "headers", &auth_checker.headers);
    writer.close();
}

fn write_statistics(writer: &mut AnyWriter, farm: &Farm) {
    if farm.statistics_categories.is_empty() {
        return;
    }
    writer.open("statistics");
    writer.open("categories");
    for category in &farm.statistics_categories {
        writer.line(&format!(
            "/{} {{ /glob \"{}\" }}",
            category.name, category.glob
        ));
    }
    writer.close();
    writer.close();
}

fn write_sticky_connections(writer: &mut AnyWriter, farm: &Farm) {
    match &farm.sticky_connections {
        None => {}
        Some(StickyConnections::Path(path)) => {
            writer.scalar("stickyConnectionsFor", path);
        }
        Some(StickyConnections::Detailed {
            paths,
            domain,
            http_only,
            secure,
        }) => {
            writer.open("stickyConnections");
            writer.open("paths");
            for path in paths {
                writer.quoted_item(path);
            }
            writer.close();
            if let Some(domain) = domain {
                writer.scalar("domain", domain);
            }
            if let Some(http_only) = http_only {
                writer.flag("httpOnly", *http_only);
            }
            if let Some(secure) = secure {
                writer.flag("secure", *secure);
            }
            writer.close();
        }
    }
}

#[cfg(test)]
#[path = "farm_tests.rs"]
mod tests;
