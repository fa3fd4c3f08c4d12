//! # yaml-path
//!
//! Find the path of the node under a cursor in a YAML or JSON document.
//!
//! Documents are parsed with `yaml-rust2`'s marked event parser into
//! [`YamlNode`] trees that keep the source position of every key and
//! sequence element. [`resolve`] walks those trees towards a `(line, col)`
//! position and returns a [`Breadcrumb`], which formats as a path such as
//! `services.traefik.ports[1]` or `networks["some-network"]`.
//!
//! ## Example
//!
//! ```rust
//! use yaml_path::{parse, resolve};
//!
//! let content = "services:\n  traefik:\n    ports:\n      - \"80:80\"\n      - \"443:443\"\n";
//!
//! let docs = parse(content).unwrap();
//! let path = resolve(&docs, 4, 10);
//! assert_eq!(path.to_string(), "services.traefik.ports[1]");
//! ```
//!
//! Positions are 0-based throughout. JSON input (with trailing commas and
//! `#` comments) is handled as YAML.
//!
//! ## Editor hosts
//!
//! Hosts that recompute the path as the user types keep parses in a
//! [`ParseCache`] and coalesce events with a [`Debouncer`]. The library owns
//! no timers: [`Settings::selection_delay`] and [`Settings::edit_delay`] size
//! the debouncers, the host schedules its own timer whenever
//! [`Debouncer::trigger`] asks for one and calls [`Debouncer::poll`] when it
//! fires. [`Settings::status_key`] names the host's status entry.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use yaml_path::{Debouncer, Poll, Settings};
//!
//! let settings = Settings::default();
//! let mut selection = Debouncer::new(settings.selection_delay());
//! let edits: Debouncer<u32> = Debouncer::new(settings.edit_delay());
//! assert!(edits.delay() > selection.delay());
//!
//! let view = 1;
//! let t0 = Instant::now();
//! assert!(selection.trigger(view, t0)); // schedule a timer
//! assert!(!selection.trigger(view, t0 + Duration::from_millis(50))); // deadline moves
//!
//! let fired = t0 + settings.selection_delay();
//! assert_eq!(selection.poll(&view, fired), Poll::Reschedule(Duration::from_millis(50)));
//! assert_eq!(selection.poll(&view, fired + Duration::from_millis(50)), Poll::Ready);
//!
//! assert_eq!(settings.status_key, "YamlPath");
//! ```

mod error;
mod node;
mod parser;
mod resolver;
mod source_info;

pub mod cache;
pub mod debounce;
pub mod path;
pub mod settings;
pub mod status;

pub use cache::{CachedParse, ParseCache, RegionSpan};
pub use debounce::{Debouncer, Poll};
pub use error::{ParseError, PathError};
pub use node::{MappingEntry, YamlNode};
pub use parser::{parse, parse_file};
pub use path::{format_path, parse_path, Breadcrumb, PathSegment};
pub use resolver::{resolve, resolve_path, resolve_text};
pub use settings::{Settings, SettingsError};
pub use source_info::{LineIndex, SourcePosition, SourceSpan};
pub use status::{reports_for_cursors, status_text, PathReport};

// Re-exported so callers can build and match keys without naming the
// dependency themselves.
pub use yaml_rust2::Yaml;
