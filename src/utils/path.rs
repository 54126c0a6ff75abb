//! 路由分组路径拼接

/// 拼接路由分组前缀与子路径
///
/// 子路径为空或为 `/` 时直接返回前缀，其余情况保证两段之间恰好一个 `/`。
///
/// ```rust
/// use rat_webkit::utils::path::join_group_path;
///
/// assert_eq!(join_group_path("/v1", "/"), "/v1");
/// assert_eq!(join_group_path("/v1/", "/api"), "/v1/api");
/// ```
pub fn join_group_path(prefix: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        return prefix.to_string();
    }

    let head = prefix.trim_end_matches('/');
    let tail = path.trim_start_matches('/');

    let mut joined = String::with_capacity(head.len() + tail.len() + 1);
    joined.push_str(head);
    joined.push('/');
    joined.push_str(tail);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root_suffix() {
        assert_eq!(join_group_path("/v1", "/"), "/v1");
        assert_eq!(join_group_path("/v1/", "/"), "/v1/");
        assert_eq!(join_group_path("/", "/"), "/");
        assert_eq!(join_group_path("/v1/api/", "/"), "/v1/api/");
        assert_eq!(join_group_path("/v1", ""), "/v1");
    }

    #[test]
    fn test_join_nested_paths() {
        assert_eq!(join_group_path("/v1", "/api/register/:project"), "/v1/api/register/:project");
        assert_eq!(
            join_group_path("/v1/long/path/john/doe", "/why/this/name/is/so/awesome"),
            "/v1/long/path/john/doe/why/this/name/is/so/awesome"
        );
        assert_eq!(join_group_path("/", "/api"), "/api");
    }

    #[test]
    fn test_join_without_boundary_slash() {
        assert_eq!(join_group_path("/v1", "api"), "/v1/api");
        assert_eq!(join_group_path("/v1/", "/api"), "/v1/api");
        assert_eq!(join_group_path("/v1//", "//api"), "/v1/api");
    }

    #[test]
    fn test_chained_join_matches_whole_path() {
        let chained = join_group_path(&join_group_path("/v1", "/api"), "/register/:project");
        let whole = join_group_path("/v1", "/api/register/:project");
        assert_eq!(chained, whole);
    }
}
