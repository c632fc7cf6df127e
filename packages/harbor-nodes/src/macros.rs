#[macro_export]
macro_rules! text {
    ($content:expr) => {{
        let text = $crate::Node::text();
        let content = ::std::string::ToString::to_string(&$content);
        $crate::Node::set_text(&text, &content);
        text
    }};
}

/// ```ignore
/// element!("div", id = "app", class = "shell"; header, text!("Hello"))
/// ```
#[macro_export]
macro_rules! element {
    ($name:expr $(, $key:ident = $value:expr)* $(; $($child:expr),* $(,)?)?) => {{
        let name = ::std::string::ToString::to_string(&$name);
        let element = $crate::Node::element(::std::option::Option::None, &name);

        $(
            let value = ::std::string::ToString::to_string(&$value);
            $crate::Node::set_attr(&element, ::std::stringify!($key), &value);
        )*
        $($(
            $crate::Node::insert(&element, &$child, ::std::option::Option::None);
        )*)?

        element
    }};
}

#[macro_export]
macro_rules! fragment {
    ($($child:expr),* $(,)?) => {{
        let fragment = $crate::Node::fragment();
        $(
            $crate::Node::insert(&fragment, &$child, ::std::option::Option::None);
        )*
        fragment
    }};
}
