use crate::engine::XTemplate;
use crate::errors::Result;
use crate::filters;

fn render_template(content: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut xt = XTemplate::new(content)?;
    for (name, value) in vars {
        xt.assign(name, value)?;
    }
    xt.render()
}

#[test]
fn render_simple_string() {
    let result = render_template("<h1>Hello world</h1>", &[]);
    assert_eq!(result.unwrap(), "<h1>Hello world</h1>".to_owned());
}

#[test]
fn render_empty_template() {
    assert_eq!(render_template("", &[]).unwrap(), "");
}

#[test]
fn render_variables() {
    let vars = [("name", "john"), ("user.name", "Bob")];
    let inputs = vec![
        ("{name}", "john"),
        ("Hello {name}!", "Hello john!"),
        ("{user.name}", "Bob"),
        ("{name # the name}", "john"),
        ("{name}{name}", "johnjohn"),
        ("{missing}", ""),
        ("a{missing}b", "ab"),
        ("{ name }", "{ name }"),
        ("{{name}}", "{john}"),
        ("<!-- a comment -->{name}", "<!-- a comment -->john"),
        ("<script>if (a) { b(); }</script>", "<script>if (a) { b(); }</script>"),
    ];

    for (input, expected) in inputs {
        println!("{:?} -> {:?}", input, expected);
        assert_eq!(render_template(input, &vars).unwrap(), expected);
    }
}

#[test]
fn substituted_values_are_not_rescanned() {
    let result = render_template("{name}", &[("name", "{other}"), ("other", "x")]);
    assert_eq!(result.unwrap(), "{other}");
}

#[test]
fn values_are_substituted_untrimmed() {
    let result = render_template("[{name}]", &[("name", "  a \n")]);
    assert_eq!(result.unwrap(), "[  a \n]");
}

#[test]
fn keeps_unassigned_variables_without_autocleanup() {
    let mut xt = XTemplate::new("a{missing # comment}b{name}").unwrap();
    xt.set_autocleanup_unassigned_variables(false);
    xt.assign("name", "c").unwrap();
    assert_eq!(xt.render().unwrap(), "a{missing # comment}bc");
}

#[test]
fn empty_value_is_still_assigned() {
    let mut xt = XTemplate::new("a{name}b").unwrap();
    xt.set_autocleanup_unassigned_variables(false);
    xt.assign("name", "").unwrap();
    assert_eq!(xt.render().unwrap(), "ab");
}

#[test]
fn values_are_not_escaped_without_filter() {
    assert_eq!(render_template("{v}", &[("v", "<b>")]).unwrap(), "<b>");
}

#[test]
fn values_go_through_the_value_filter() {
    let mut xt = XTemplate::new("<p title=\"{title}\">{body}</p>").unwrap();
    xt.set_value_filter(filters::escape_html);
    xt.assign("title", "\"quoted\"").unwrap();
    xt.assign("body", "<script>").unwrap();
    assert_eq!(xt.render().unwrap(), "<p title=\"&quot;quoted&quot;\">&lt;script&gt;</p>");
}

#[test]
fn variables_are_global_to_all_blocks() {
    let mut xt = XTemplate::new("{v}<!-- BEGIN: a -->{v}<!-- BEGIN: b -->{v}<!-- END: b --><!-- END: a -->")
        .unwrap();
    xt.assign("v", "1").unwrap();
    xt.parse("root.a.b").unwrap();
    xt.parse("root.a").unwrap();
    assert_eq!(xt.render().unwrap(), "111");
}
