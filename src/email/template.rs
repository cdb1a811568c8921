use crate::email::error::TemplateError;
use crate::email::error::TemplateError::{
    CantReadTemplateFile, DuplicatePlaceholder, MalformedTemplate, MissingPlaceholder,
};
use crate::tools::log_message_and_return;
use std::collections::HashMap;
use std::convert::identity;
use std::fs;
use std::path::Path;

/// Template name selecting [`DEFAULT_TEMPLATE`] without looking at the filesystem.
pub const DEFAULT_TEMPLATE_NAME: &str = "default";
/// Placeholder replaced by the environment link.
pub const LINK_PLACEHOLDER: &str = "sandbox_link";

pub const DEFAULT_TEMPLATE: &str = r#"
<!DOCTYPE html>
<html lang="en">
<div>
    <h2 style="text-align: center;"><span style="color: #F76723;"><strong>Welcome to Training</strong></span></h2>
</div>
<div>
    <p><span style="color: #000000;">Please retain this email as it is how you will access your online lab environment. It also contains your credentials (if needed) and links to helpful materials.</span></p>
</div>
<div>
    <p><span style="color: #000000;">I&rsquo;m looking forward to our class together</span></p>
</div>
<div>
    <p><span style="color: #000000;"><strong>To access your CloudShell Environment please use the following:</strong></span></p>
</div>
<div>
    <span style="color: #000000;"><span style="color: #F76723;"><strong>&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;Environment details:</strong></span></span><br>
</div>
<div>
    <span style="color: #000000;">&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;
        <a href="{sandbox_link}"> Environment Link </a>
    </span>
</div>
</body>
</html>
"#;

/// Render the HTML body of an email.
///
/// `template_name` is either [`DEFAULT_TEMPLATE_NAME`] or a path to a template file.
/// A path that doesn't point to an existing file falls back to the default template.
/// File templates may use `{sandbox_link}` and any key of `extra`; the default template
/// only receives the link.
pub fn load_and_format_template(
    template_name: &str,
    link: &str,
    extra: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    render(template_name, link, extra).map_err(log_message_and_return(
        "Failed loading email template",
        identity,
    ))
}

fn render(
    template_name: &str,
    link: &str,
    extra: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let path = Path::new(template_name);
    if template_name == DEFAULT_TEMPLATE_NAME || !path.is_file() {
        if template_name != DEFAULT_TEMPLATE_NAME {
            log::warn!("Template file {template_name:?} not found, using default template");
        }
        let values = HashMap::from([(LINK_PLACEHOLDER, link)]);
        return format_template(DEFAULT_TEMPLATE, &values);
    }

    let template = fs::read_to_string(path).map_err(|source| CantReadTemplateFile {
        path: path.to_path_buf(),
        source,
    })?;
    if extra.contains_key(LINK_PLACEHOLDER) {
        return Err(DuplicatePlaceholder(LINK_PLACEHOLDER.to_owned()));
    }
    let mut values: HashMap<&str, &str> = extra
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    values.insert(LINK_PLACEHOLDER, link);
    format_template(&template, &values)
}

/// Substitute every `{name}` of `template` with its value.
///
/// `{{` and `}}` stand for literal braces. The name is everything up to the closing brace.
/// A placeholder without value, an unclosed brace or an empty name is an error, as is a
/// name holding `{`, `.`, `[`, `:` or `!`.
pub fn format_template(template: &str, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(index) = rest.find(['{', '}']) {
        output.push_str(&rest[..index]);
        let position = offset + index;
        let tail = &rest[index..];

        let consumed = if tail.starts_with("{{") {
            output.push('{');
            2
        } else if tail.starts_with("}}") {
            output.push('}');
            2
        } else if tail.starts_with('}') {
            return Err(MalformedTemplate {
                position,
                reason: "single '}' encountered",
            });
        } else {
            let end = tail.find('}').ok_or(MalformedTemplate {
                position,
                reason: "unclosed placeholder",
            })?;
            let name = &tail[1..end];
            if name.is_empty() || name.contains(['{', '.', '[', ':', '!']) {
                return Err(MalformedTemplate {
                    position,
                    reason: "placeholder name must be non-empty, without '{', '.', '[', ':' or '!'",
                });
            }
            let value = values
                .get(name)
                .ok_or_else(|| MissingPlaceholder(name.to_owned()))?;
            output.push_str(value);
            end + 1
        };

        rest = &tail[consumed..];
        offset = position + consumed;
    }
    output.push_str(rest);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test::tests::{temp_dir, temp_file};

    const LINK: &str = "Default Link";
    const NOT_DEFAULT_TEMPLATE: &str = "\n{sandbox_link}\n";
    const ARGS_TEMPLATE: &str = "\n{sandbox_link}\n{arg1}\n{arg2}\n{arg3}\n";

    fn get_extra_args() -> HashMap<String, String> {
        HashMap::from([
            ("arg1".to_owned(), "argument1".to_owned()),
            ("arg2".to_owned(), "argument2".to_owned()),
            ("arg3".to_owned(), "argument3".to_owned()),
        ])
    }

    fn expected_default_body(link: &str) -> String {
        DEFAULT_TEMPLATE.replace("{sandbox_link}", link)
    }

    mod load_and_format_template {
        use super::*;

        #[test]
        fn should_use_default_template_for_sentinel_name() {
            let content = load_and_format_template(DEFAULT_TEMPLATE_NAME, LINK, &HashMap::new()).unwrap();

            assert_eq!(expected_default_body(LINK), content);
        }

        #[test]
        fn should_use_default_template_when_file_is_missing() {
            let content = load_and_format_template("", LINK, &HashMap::new()).unwrap();

            assert_eq!(expected_default_body(LINK), content);
        }

        #[test]
        fn should_use_default_template_when_path_does_not_exist() {
            let content =
                load_and_format_template("/this/template/does/not/exist.html", LINK, &get_extra_args())
                    .unwrap();

            assert_eq!(expected_default_body(LINK), content);
        }

        #[test]
        fn should_use_template_file() {
            let path = temp_file("template.html", NOT_DEFAULT_TEMPLATE);

            let content = load_and_format_template(path.to_str().unwrap(), LINK, &HashMap::new()).unwrap();

            assert_eq!("\nDefault Link\n", content);
        }

        #[test]
        fn should_use_template_file_with_args() {
            let path = temp_file("template.html", ARGS_TEMPLATE);

            let content = load_and_format_template(path.to_str().unwrap(), LINK, &get_extra_args()).unwrap();

            assert_eq!("\nDefault Link\nargument1\nargument2\nargument3\n", content);
        }

        #[test]
        fn should_fail_when_template_file_needs_missing_arg() {
            let path = temp_file("template.html", ARGS_TEMPLATE);

            let error = load_and_format_template(path.to_str().unwrap(), LINK, &HashMap::new()).unwrap_err();

            assert!(matches!(error, MissingPlaceholder(name) if name == "arg1"));
        }

        #[test]
        fn should_use_template_file_with_hyphenated_arg() {
            let path = temp_file("template.html", "{sandbox_link} {first-name}");
            let extra = HashMap::from([("first-name".to_owned(), "Ada".to_owned())]);

            let content = load_and_format_template(path.to_str().unwrap(), "L", &extra).unwrap();

            assert_eq!("L Ada", content);
        }

        #[test]
        fn should_fail_when_template_file_is_unreadable() {
            let path = temp_dir().join("template.html");
            fs::write(&path, [0xff, 0xfe]).unwrap();

            let error = load_and_format_template(path.to_str().unwrap(), LINK, &HashMap::new()).unwrap_err();

            assert!(matches!(error, CantReadTemplateFile { path: error_path, .. } if error_path == path));
        }

        #[test]
        fn should_fail_when_args_redefine_link() {
            let path = temp_file("template.html", NOT_DEFAULT_TEMPLATE);
            let extra = HashMap::from([(LINK_PLACEHOLDER.to_owned(), "other".to_owned())]);

            let error = load_and_format_template(path.to_str().unwrap(), LINK, &extra).unwrap_err();

            assert!(matches!(error, DuplicatePlaceholder(name) if name == LINK_PLACEHOLDER));
        }
    }

    mod format_template {
        use super::*;
        use parameterized::{ide, parameterized};

        ide!();

        #[parameterized(
            template = {
                "",
                "no placeholder",
                "<a href=\"{sandbox_link}\">{sandbox_link}</a>",
                "body {{ color: red; }} {sandbox_link}",
                "{{sandbox_link}}",
                "{arg_1}{sandbox_link}",
                "{sandbox_link} {first-name}",
                "{course name}",
            },
            expected_result = {
                "",
                "no placeholder",
                "<a href=\"http://x\">http://x</a>",
                "body { color: red; } http://x",
                "{sandbox_link}",
                "valuehttp://x",
                "http://x Ada",
                "Rust 101",
            }
        )]
        fn should_format(template: &str, expected_result: &str) {
            let values = HashMap::from([
                (LINK_PLACEHOLDER, "http://x"),
                ("arg_1", "value"),
                ("first-name", "Ada"),
                ("course name", "Rust 101"),
            ]);

            let result = format_template(template, &values).unwrap();

            assert_eq!(expected_result, result);
        }

        #[parameterized(
            template = {"{unknown}", "{0}"},
            expected_name = {"unknown", "0"}
        )]
        fn should_fail_on_missing_placeholder(template: &str, expected_name: &str) {
            let values = HashMap::from([(LINK_PLACEHOLDER, "http://x")]);

            let error = format_template(template, &values).unwrap_err();

            assert!(matches!(error, MissingPlaceholder(name) if name == expected_name));
        }

        #[parameterized(
            template = {"abc {sandbox_link", "abc } def", "{}", "{a.b}", "{a[0]}", "{a:>10}", "{a!r}", "{a{b}"},
            expected_position = {4, 4, 0, 0, 0, 0, 0, 0}
        )]
        fn should_fail_on_malformed_template(template: &str, expected_position: usize) {
            let values = HashMap::from([(LINK_PLACEHOLDER, "http://x")]);

            let error = format_template(template, &values).unwrap_err();

            assert!(matches!(error, MalformedTemplate { position, .. } if position == expected_position));
        }

        #[test]
        fn should_format_default_template() {
            let values = HashMap::from([(LINK_PLACEHOLDER, "http://x")]);

            let result = format_template(DEFAULT_TEMPLATE, &values).unwrap();

            assert!(result.contains(r#"<a href="http://x"> Environment Link </a>"#));
            assert!(!result.contains('{'));
        }
    }
}
