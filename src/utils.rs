use std::path::{Component, Path};

/// Map `path` below `root` to an archive entry name under `prefix`.
///
/// Components are joined with `/` whatever the host separator is. Returns
/// `None` when `path` is not below `root` or is not valid UTF-8.
pub fn entry_name(prefix: &str, root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut name = prefix.trim_end_matches('/').to_string();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                name.push('/');
                name.push_str(part.to_str()?);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }

    if name.len() == prefix.trim_end_matches('/').len() {
        return None;
    }

    Some(name)
}

/// Human readable size in megabytes with two decimals
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_entry_name_nested() {
        let root = PathBuf::from("main").join("assets");
        let path = root.join("sub").join("b.txt");
        assert_eq!(
            entry_name("base/assets", &root, &path).as_deref(),
            Some("base/assets/sub/b.txt")
        );
    }

    #[test]
    fn test_entry_name_trailing_slash_prefix() {
        let root = PathBuf::from("res");
        let path = root.join("values").join("strings.xml");
        assert_eq!(
            entry_name("base/res/", &root, &path).as_deref(),
            Some("base/res/values/strings.xml")
        );
    }

    #[test]
    fn test_entry_name_outside_root() {
        assert_eq!(entry_name("base/res", Path::new("res"), Path::new("other/a.xml")), None);
    }

    #[test]
    fn test_entry_name_root_itself() {
        assert_eq!(entry_name("base/res", Path::new("res"), Path::new("res")), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 MB");
        assert_eq!(format_size(1024 * 1024 * 3 / 2), "1.50 MB");
    }
}
