//! Legacy factory parsing and class-factory rendering.
//!
//! A pre-Laravel-8 factory file registers a closure:
//!
//! ```php
//! $factory->define(App\User::class, function (Faker $faker) {
//!     return [
//!         'name' => $faker->name,
//!     ];
//! });
//! ```
//!
//! [`FactoryDefinition::parse`] extracts the model class and the attribute
//! array from that shape with a multiline regex, and [`FactoryDefinition::render`]
//! emits the Laravel 8 class factory. This is shallow text extraction, not
//! PHP parsing: a definition the pattern does not match is reported as
//! unrecognized, and exotic constructs inside the attribute array are
//! carried over verbatim.

use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RewriteError;

// Patterns are compile-time constants; unwrap cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static DEFINE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\$factory->define\(\s*([A-Za-z0-9_\\]+)::class\s*,\s*function\s*\(\s*Faker\s+\$(\w+)\s*\)\s*\{\s*return\s*(\[.*?\])\s*;\s*\}\s*\)\s*;",
    )
    .unwrap()
});

#[allow(clippy::unwrap_used)]
static USE_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^use\s+([A-Za-z0-9_\\]+)(?:\s+as\s+\w+)?;").unwrap());

/// A parsed legacy factory definition.
///
/// Holds everything needed to render the class factory and to locate the
/// associated model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDefinition {
    /// Fully qualified model class, e.g. `App\Models\User`.
    pub model_fqcn: String,
    /// Unqualified model class, e.g. `User`.
    pub model_short: String,
    /// The attribute array body, brackets included, as captured.
    attributes: String,
    /// The closure's faker variable name (usually `faker`).
    faker_var: String,
}

impl FactoryDefinition {
    /// Parses a legacy factory file's contents.
    ///
    /// The model class may be written fully qualified at the call site or
    /// imported with a `use` statement; both forms resolve to the FQCN.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnrecognizedFactory`] when the contents do
    /// not contain a `$factory->define(...)` registration in the expected
    /// shape.
    pub fn parse(path: &Utf8Path, contents: &str) -> Result<Self, RewriteError> {
        let captures = DEFINE_CALL
            .captures(contents)
            .ok_or_else(|| RewriteError::unrecognized_factory(path))?;

        let class_ref = &captures[1];
        let faker_var = captures[2].to_owned();
        let attributes = captures[3].to_owned();

        let model_fqcn = resolve_fqcn(class_ref, contents);
        let model_short = short_name(&model_fqcn).to_owned();

        Ok(Self {
            model_fqcn,
            model_short,
            attributes,
            faker_var,
        })
    }

    /// The class name of the generated factory, e.g. `UserFactory`.
    #[must_use]
    pub fn factory_class(&self) -> String {
        format!("{}Factory", self.model_short)
    }

    /// The file name of the generated factory, e.g. `UserFactory.php`.
    #[must_use]
    pub fn factory_file_name(&self) -> String {
        format!("{}Factory.php", self.model_short)
    }

    /// Renders the Laravel 8 class factory.
    ///
    /// The attribute array is carried over with the faker variable rewritten
    /// to `$this->faker` and one extra level of indentation. Doc blocks are
    /// omitted when `without_doc_blocks` is set.
    #[must_use]
    pub fn render(&self, without_doc_blocks: bool) -> String {
        let attributes = self.reindented_attributes();
        let mut out = String::new();

        out.push_str("<?php\n\nnamespace Database\\Factories;\n\n");
        out.push_str(&format!("use {};\n", self.model_fqcn));
        out.push_str("use Illuminate\\Database\\Eloquent\\Factories\\Factory;\n\n");
        out.push_str(&format!("class {} extends Factory\n{{\n", self.factory_class()));

        if !without_doc_blocks {
            out.push_str(
                "    /**\n     * The name of the factory's corresponding model.\n     *\n     * @var string\n     */\n",
            );
        }
        out.push_str(&format!(
            "    protected $model = {}::class;\n\n",
            self.model_short
        ));

        if !without_doc_blocks {
            out.push_str(
                "    /**\n     * Define the model's default state.\n     *\n     * @return array\n     */\n",
            );
        }
        out.push_str("    public function definition(): array\n    {\n");
        out.push_str(&format!("        return {attributes};\n"));
        out.push_str("    }\n}\n");

        out
    }

    /// Rewrites the faker variable and shifts the array body one level
    /// deeper, matching its new nesting inside `definition()`.
    fn reindented_attributes(&self) -> String {
        let rewritten = self
            .attributes
            .replace(&format!("${}->", self.faker_var), "$this->faker->");

        let mut lines = rewritten.lines();
        let Some(first) = lines.next() else {
            return rewritten;
        };

        let mut out = first.to_owned();
        for line in lines {
            out.push('\n');
            if !line.is_empty() {
                out.push_str("    ");
            }
            out.push_str(line);
        }
        out
    }
}

/// Resolves a class reference against the file's `use` statements.
///
/// A reference that already contains a namespace separator is taken as
/// fully qualified. Otherwise the first import whose trailing segment
/// matches wins; with no matching import, the bare name is returned
/// unchanged.
fn resolve_fqcn(class_ref: &str, contents: &str) -> String {
    if class_ref.contains('\\') {
        return class_ref.to_owned();
    }

    for captures in USE_STATEMENT.captures_iter(contents) {
        let import = &captures[1];
        if short_name(import) == class_ref && import != "Faker\\Generator" {
            return import.to_owned();
        }
    }

    class_ref.to_owned()
}

/// The last segment of a backslash-separated class name.
fn short_name(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}
