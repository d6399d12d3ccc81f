//! JavaScript module generation.
//!
//! Each transformed template becomes a self-contained ES module that imports
//! Handlebars, registers every partial, and exports the compiled
//! template as its default export:
//!
//! ```js
//! import Handlebars from 'handlebars';
//!
//! Handlebars.registerPartial("sub/test3", Handlebars.compile("<p>3</p>", {}));
//! Handlebars.registerPartial("test1", Handlebars.compile("<p>1</p>", {}));
//! export default Handlebars.compile("{{> test1}}", {});
//! ```
//!
//! With optimized registration every `registerPartial` is wrapped in
//! `if (!Handlebars.partials["name"]) { ... }`, so modules sharing partials
//! skip the redundant work. The end state of the partial registry is the same
//! either way.
//!
//! Output is byte-identical for equal inputs. Hosts rely on this for build
//! caching.
//!
//! Templates are compiled when the module loads, not at build time, so the
//! import is the full `'handlebars'` package. Bundles therefore ship the
//! Handlebars compiler, not just `handlebars/runtime`.

use std::fmt::Write as _;

use crate::templating::compiler::PrecompiledTemplate;
use crate::templating::registry::PartialMap;

/// The runtime import every generated module starts with.
pub const RUNTIME_IMPORT: &str = "import Handlebars from 'handlebars';";

/// Generates module source for compiled templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleEmitter;

impl ModuleEmitter {
    /// Emit the module for `target` with `partials` registered first, in map
    /// order.
    #[must_use]
    pub fn emit(target: &PrecompiledTemplate, partials: &PartialMap, optimize: bool) -> String {
        let mut code = String::new();
        code.push_str(RUNTIME_IMPORT);
        code.push_str("\n\n");

        for (name, template) in partials.iter() {
            let name = json_string(name);
            let registration = format!("Handlebars.registerPartial({name}, {});", compile_call(template));

            // Writing to a String cannot fail.
            let _ = if optimize {
                writeln!(code, "if (!Handlebars.partials[{name}]) {{ {registration} }}")
            } else {
                writeln!(code, "{registration}")
            };
        }

        let _ = writeln!(code, "export default {};", compile_call(target));
        code
    }
}

fn compile_call(template: &PrecompiledTemplate) -> String {
    format!(
        "Handlebars.compile({}, {})",
        template.source_literal(),
        template.options_literal()
    )
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
