
/// Model-level validation rules
pub mod validation_tests {
    use crate::{author, errors, todo_item, workspace};

    #[test]
    fn blank_names_are_rejected() {
        assert!(workspace::validate_name("   ").is_err());
        assert!(author::validate_name("").is_err());
        assert!(todo_item::validate_title("\t").is_err());
    }

    #[test]
    fn overlong_labels_are_rejected() {
        let long = "x".repeat(errors::LABEL_MAX_LEN + 1);
        let err = workspace::validate_name(&long).unwrap_err();
        assert!(err.to_string().contains("longer than"));
        assert!(workspace::validate_name(&"x".repeat(errors::LABEL_MAX_LEN)).is_ok());
    }

    #[test]
    fn ordinary_labels_pass() {
        assert!(author::validate_name("Ada").is_ok());
        assert!(todo_item::validate_title("write docs").is_ok());
    }
}
