use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Error, Expr, ExprLit, Lit, LitStr, MetaNameValue, Result, Token,
};

#[derive(Default)]
pub struct MainArgs {
    pub target: Option<LitStr>,
    pub config: Option<LitStr>,
    pub stylesheets: Vec<LitStr>,
}

impl Parse for MainArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = Self::default();

        let options = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        for option in options {
            let Some(name) = option.path.get_ident() else {
                return Err(Error::new_spanned(&option.path, "expected an option name"));
            };
            let value = match &option.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => lit.clone(),
                other => return Err(Error::new_spanned(other, "expected a string literal")),
            };

            match name.to_string().as_str() {
                "target" => set_once(&mut args.target, name, value)?,
                "config" => set_once(&mut args.config, name, value)?,
                "stylesheet" => args.stylesheets.push(value),
                other => {
                    return Err(Error::new_spanned(
                        name,
                        format!(
                            "unknown option `{other}`, expected `target`, `stylesheet` or `config`"
                        ),
                    ))
                }
            }
        }

        Ok(args)
    }
}

fn set_once(slot: &mut Option<LitStr>, name: &syn::Ident, value: LitStr) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(Error::new_spanned(
            name,
            format!("option `{name}` given more than once"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MainArgs;

    fn rejection(input: &str) -> String {
        match syn::parse_str::<MainArgs>(input) {
            Ok(_) => panic!("`{input}` was accepted"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn accepts_every_option() {
        let args = syn::parse_str::<MainArgs>(
            r#"config = "Harbor.toml", target = "root", stylesheet = "a.css", stylesheet = "b.css","#,
        )
        .unwrap();

        assert_eq!(args.config.unwrap().value(), "Harbor.toml");
        assert_eq!(args.target.unwrap().value(), "root");
        let stylesheets = args
            .stylesheets
            .iter()
            .map(|lit| lit.value())
            .collect::<Vec<_>>();
        assert_eq!(stylesheets, ["a.css", "b.css"]);
    }

    #[test]
    fn accepts_no_options() {
        let args = syn::parse_str::<MainArgs>("").unwrap();
        assert!(args.target.is_none());
        assert!(args.config.is_none());
        assert!(args.stylesheets.is_empty());
    }

    #[test]
    fn rejects_unknown_options() {
        assert_eq!(
            rejection(r#"theme = "dark""#),
            "unknown option `theme`, expected `target`, `stylesheet` or `config`"
        );
    }

    #[test]
    fn rejects_non_string_values() {
        assert_eq!(rejection("target = 1"), "expected a string literal");
        assert_eq!(rejection("target = app"), "expected a string literal");
    }

    #[test]
    fn rejects_repeated_single_options() {
        assert_eq!(
            rejection(r#"target = "a", target = "b""#),
            "option `target` given more than once"
        );
        assert_eq!(
            rejection(r#"config = "a.toml", config = "b.toml""#),
            "option `config` given more than once"
        );
    }

    #[test]
    fn rejects_paths_as_names() {
        assert_eq!(rejection(r#"a::target = "app""#), "expected an option name");
    }
}
