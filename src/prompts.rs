pub const PRODUCT_PHOTOGRAPHY: &str = include_str!("../data/prompts/product_photography.txt");

/// Build the prompt sent to the image model from an (already translated)
/// product name and offer text. Inputs are embedded verbatim.
pub fn build_prompt(product_name: &str, offer_text: &str) -> String {
    render(
        PRODUCT_PHOTOGRAPHY,
        &[("product_name", product_name), ("offer_text", offer_text)],
    )
}

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass over the template: placeholder-looking text
/// inside a substituted value is never expanded again. Unknown placeholders
/// are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unterminated_placeholders() {
        assert_eq!(render("{{x}} {{a}}", &[("a", "1")]), "{{x}} 1");
        assert_eq!(render("tail {{open", &[("open", "no")]), "tail {{open");
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        assert_eq!(
            render("{{a}}/{{b}}", &[("a", "{{b}}"), ("b", "x")]),
            "{{b}}/x"
        );
    }

    #[test]
    fn test_template_has_placeholders() {
        assert!(PRODUCT_PHOTOGRAPHY.contains("{{product_name}}"));
        assert!(PRODUCT_PHOTOGRAPHY.contains("{{offer_text}}"));
    }

    #[test]
    fn test_build_prompt_fills_template() {
        let prompt = build_prompt("running shoes", "50% off");

        assert!(prompt.starts_with("Award-winning product photography of running shoes."));
        assert!(prompt.contains("shows the text '50% off'"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let inputs = [
            ("chocolate cake", "limited edition"),
            ("", ""),
            ("תיק עור", "קולקציה חדשה"),
        ];
        for (product, offer) in inputs {
            assert_eq!(build_prompt(product, offer), build_prompt(product, offer));
        }
    }

    #[test]
    fn test_build_prompt_embeds_inputs_verbatim() {
        let long_offer = "x".repeat(10_000);
        let inputs = [
            ("leather bag", "new collection"),
            ("נעלי ספורט", "50% הנחה"),
            ("quotes ' and \" and \\n", "<b>html</b> & stuff"),
            ("{{offer_text}}", "{{product_name}}"),
            ("short", long_offer.as_str()),
        ];
        for (product, offer) in inputs {
            let prompt = build_prompt(product, offer);
            assert!(prompt.contains(product), "missing product {:?}", product);
            assert!(prompt.contains(offer), "missing offer {:?}", offer);
        }
    }
}
