//! `HasFactory` trait insertion for model files.
//!
//! Laravel 8 models opt into class factories with the
//! `Illuminate\Database\Eloquent\Factories\HasFactory` trait. For each
//! converted factory, the associated model file gains the import and a
//! `use HasFactory;` statement at the top of the class body.
//!
//! Insertion is positional text editing against the conventional PSR-12
//! model layout. A model that already mentions `HasFactory` is left alone,
//! as is a file whose layout the editor cannot place an insertion into.

use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;

const HAS_FACTORY_IMPORT: &str = "use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;\n";

// Patterns are compile-time constants; unwrap cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static NAMESPACE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^namespace\s+[A-Za-z0-9_\\]+;\n").unwrap());

#[allow(clippy::unwrap_used)]
static FIRST_USE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^use\s+").unwrap());

#[allow(clippy::unwrap_used)]
static CLASS_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^(?:final\s+|abstract\s+)?class\s+\w+[^{]*\{\n?").unwrap());

/// Resolves a model FQCN to its file path under the project root.
///
/// Follows the Laravel autoload convention: the `App\` namespace prefix
/// maps to the `app/` directory, so `App\Models\User` resolves to
/// `app/Models/User.php`. Models outside the `App\` namespace cannot be
/// located and return `None`.
#[must_use]
pub fn model_file_path(root: &Utf8Path, model_fqcn: &str) -> Option<Utf8PathBuf> {
    let relative = model_fqcn.strip_prefix("App\\")?;
    let mut path = root.join("app");
    for segment in relative.split('\\') {
        path.push(segment);
    }
    path.set_extension("php");
    Some(path)
}

/// Inserts the `HasFactory` import and trait usage into a model file.
///
/// Returns the updated contents, or `None` when nothing should change:
/// the trait is already present, or no class body was found to insert
/// into.
#[must_use]
pub fn add_has_factory(contents: &str) -> Option<String> {
    if contents.contains("HasFactory") {
        return None;
    }

    let class_open = CLASS_OPEN.find(contents)?;

    // Import goes before the first use statement above the class, or
    // failing that, after the namespace declaration.
    let import_at = FIRST_USE_LINE
        .find(contents)
        .map(|m| m.start())
        .filter(|&at| at < class_open.start())
        .or_else(|| NAMESPACE_LINE.find(contents).map(|m| m.end()))?;

    // The class body opens after the matched `{`; the trait statement goes
    // on the first line inside it.
    let body_at = class_open.end();

    let mut updated = String::with_capacity(contents.len() + 64);
    updated.push_str(&contents[..import_at]);
    updated.push_str(HAS_FACTORY_IMPORT);
    updated.push_str(&contents[import_at..body_at]);
    updated.push_str("    use HasFactory;\n\n");
    updated.push_str(&contents[body_at..]);

    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class User extends Model
{
    protected $guarded = [];
}
";

    #[test]
    fn test_model_file_path_resolution() {
        let root = Utf8Path::new("/project");

        assert_eq!(
            model_file_path(root, "App\\Models\\User"),
            Some(Utf8PathBuf::from("/project/app/Models/User.php"))
        );
        assert_eq!(
            model_file_path(root, "App\\User"),
            Some(Utf8PathBuf::from("/project/app/User.php"))
        );
        assert_eq!(model_file_path(root, "Vendor\\Package\\User"), None);
    }

    #[test]
    fn test_inserts_import_and_trait() {
        let updated = add_has_factory(MODEL).unwrap();

        assert!(updated.contains(
            "use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;\nuse Illuminate\\Database\\Eloquent\\Model;\n"
        ));
        assert!(updated.contains("class User extends Model\n{\n    use HasFactory;\n\n"));
        assert!(updated.contains("protected $guarded = [];"));
    }

    #[test]
    fn test_skips_model_with_trait_already() {
        let contents = MODEL.replace(
            "use Illuminate\\Database\\Eloquent\\Model;",
            "use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;\nuse Illuminate\\Database\\Eloquent\\Model;",
        );

        assert_eq!(add_has_factory(&contents), None);
    }

    #[test]
    fn test_model_without_imports_uses_namespace_anchor() {
        let contents = "<?php\n\nnamespace App;\n\nclass User\n{\n}\n";
        let updated = add_has_factory(contents).unwrap();

        assert!(updated.contains("namespace App;\nuse Illuminate\\Database\\Eloquent\\Factories\\HasFactory;\n"));
        assert!(updated.contains("class User\n{\n    use HasFactory;\n\n}\n"));
    }

    #[test]
    fn test_no_class_body_leaves_file_alone() {
        assert_eq!(add_has_factory("<?php\n\nreturn [];\n"), None);
    }
}
