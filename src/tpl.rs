use crate::config::AppInfo;
use std::collections::BTreeMap;

/// Template processor for resolving $VARIABLE format variables
pub struct Tpl {
    variables: BTreeMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: BTreeMap::new(),
        }
    }

    /// Template processor preloaded with the application variables
    /// ($NAME, $LOWERNAME, $PACKAGE, $VERSION)
    pub fn for_app(app: &AppInfo) -> Self {
        let mut tpl = Self::new();
        tpl.register("NAME", &app.name);
        tpl.register("LOWERNAME", app.name.to_lowercase());
        tpl.register("PACKAGE", &app.package);
        tpl.register("VERSION", &app.version);
        tpl
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all $VARIABLE references
    pub fn parse(&self, input: &str) -> String {
        // Longest keys first so `$NAME` never eats the front of `$NAMESPACE`
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        let mut result = input.to_string();
        for key in keys {
            let pattern = format!("${}", key);
            result = result.replace(&pattern, &self.variables[key]);
        }

        result
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_variables() {
        let app = AppInfo {
            name: "AmigoMontador".to_string(),
            package: "com.amigomontador.app".to_string(),
            version: "1.0.0".to_string(),
        };
        let tpl = Tpl::for_app(&app);

        assert_eq!(tpl.parse("$LOWERNAME-release.aab"), "amigomontador-release.aab");
        assert_eq!(tpl.parse("$PACKAGE-$VERSION.aab"), "com.amigomontador.app-1.0.0.aab");
    }

    #[test]
    fn test_overlapping_keys() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "app");
        tpl.register("NAMESPACE", "com.example");

        assert_eq!(tpl.parse("$NAMESPACE/$NAME"), "com.example/app");
    }

    #[test]
    fn test_unknown_variable_is_kept() {
        let tpl = Tpl::new();
        assert_eq!(tpl.parse("$MISSING.aab"), "$MISSING.aab");
    }
}
