use harbor::prelude::*;

#[harbor::main(target = "app", stylesheet = "app.css")]
fn app() -> DomNode {
    element!("main", class = "hello";
        element!("h1"; text!("Hello, harbor!")),
        element!("p"; text!("Mounted into #app.")),
    )
}
