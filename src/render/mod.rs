mod any;
mod apache;
mod farm;

pub use any::{AnyWriter, bool_value, quote_pattern, rule_type, sequence_key, write_glob_rules};
pub use apache::{DISPATCHER_CONF, FARMS_ANY, render_dispatcher_conf, render_farms_include};
pub use farm::{farm_file_name, render_farm};
