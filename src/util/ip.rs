/// dotted quad check used before any ethernet config leaves the client
/// four groups of 1-3 ascii digits, each within 0-255; leading zeros are accepted
pub fn is_dotted_quad(s: &str) -> bool {
    let groups: Vec<&str> = s.split('.').collect();
    if groups.len() != 4 {
        return false;
    }
    groups.iter().all(|g| {
        !g.is_empty()
            && g.len() <= 3
            && g.bytes().all(|b| b.is_ascii_digit())
            && g.parse::<u16>().map(|v| v <= 255).unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_dotted_quad("192.168.1.177"));
        assert!(is_dotted_quad("255.255.255.0"));
        assert!(is_dotted_quad("0.0.0.0"));
        assert!(is_dotted_quad("010.001.0.9"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_dotted_quad("999.1.1.1"));
        assert!(!is_dotted_quad("256.1.1.1"));
        assert!(!is_dotted_quad("1.1.1"));
        assert!(!is_dotted_quad("1.1.1.1.1"));
        assert!(!is_dotted_quad("1..1.1"));
        assert!(!is_dotted_quad("0001.1.1.1"));
        assert!(!is_dotted_quad("1.1.1.a"));
        assert!(!is_dotted_quad(" 1.1.1.1"));
        assert!(!is_dotted_quad("+1.1.1.1"));
        assert!(!is_dotted_quad(""));
    }
}
