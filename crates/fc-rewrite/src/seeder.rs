//! Seeder conversion.
//!
//! Laravel 8 moves seeders from the global namespace into
//! `Database\Seeders`. The conversion inserts the namespace declaration
//! after the PHP open tag when the file has none, then applies the
//! call-site rules so `factory(...)` invocations inside the seeder are
//! rewritten in the same pass (the seeder directory is excluded from the
//! generic call-site scan).

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{RuleSet, call_site_rules};

// Pattern is a compile-time constant; unwrap cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static OPEN_TAG_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^<\?php[^\n]*\n").unwrap());

static SEEDER_CALL_SITE_RULES: Lazy<RuleSet> = Lazy::new(call_site_rules);

/// Converts a seeder's contents to the Laravel 8 convention.
///
/// Files that already declare a namespace keep it; the call-site rules are
/// still applied. Files without a recognizable open tag pass through the
/// namespace step unchanged.
#[must_use]
pub fn convert(contents: &str) -> String {
    let namespaced = insert_namespace(contents);
    SEEDER_CALL_SITE_RULES.apply(&namespaced).into_owned()
}

/// Inserts `namespace Database\Seeders;` after the open tag when the file
/// declares no namespace.
fn insert_namespace(contents: &str) -> Cow<'_, str> {
    if contents.contains("namespace ") {
        return Cow::Borrowed(contents);
    }

    let Some(open_tag) = OPEN_TAG_LINE.find(contents) else {
        return Cow::Borrowed(contents);
    };

    let mut updated = String::with_capacity(contents.len() + 32);
    updated.push_str(&contents[..open_tag.end()]);
    updated.push_str("\nnamespace Database\\Seeders;\n");
    updated.push_str(&contents[open_tag.end()..]);
    Cow::Owned(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEEDER: &str = r"<?php

use Illuminate\Database\Seeder;

class UsersTableSeeder extends Seeder
{
    public function run()
    {
        factory(App\User::class, 10)->create();
    }
}
";

    #[test]
    fn test_inserts_namespace_after_open_tag() {
        let converted = convert(SEEDER);

        assert!(converted.starts_with("<?php\n\nnamespace Database\\Seeders;\n\n"));
        assert!(converted.contains("use Illuminate\\Database\\Seeder;"));
    }

    #[test]
    fn test_call_sites_rewritten_in_same_pass() {
        let converted = convert(SEEDER);

        assert!(converted.contains("App\\User::factory()->count(10)->create();"));
        assert!(!converted.contains("factory(App\\User::class"));
    }

    #[test]
    fn test_existing_namespace_is_kept() {
        let contents = "<?php\n\nnamespace Database\\Seeders;\n\nclass DatabaseSeeder\n{\n}\n";
        let converted = convert(contents);

        assert_eq!(converted, contents);
        assert_eq!(converted.matches("namespace ").count(), 1);
    }

    #[test]
    fn test_strict_types_open_tag() {
        let contents = "<?php declare(strict_types=1);\n\nclass DatabaseSeeder\n{\n}\n";
        let converted = convert(contents);

        assert!(converted.starts_with(
            "<?php declare(strict_types=1);\n\nnamespace Database\\Seeders;\n"
        ));
    }

    #[test]
    fn test_contents_without_open_tag_pass_through() {
        assert_eq!(convert("not php at all\n"), "not php at all\n");
    }
}
