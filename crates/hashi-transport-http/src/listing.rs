//! Human-readable HTML listing of the registered methods.

use quick_xml::escape::escape;

use hashi_dispatch::Dispatcher;

/// Renders one row per method: name, signature and help.
pub(crate) fn render(dispatcher: &Dispatcher, rpc_path: &str) -> String {
    let mut rows = String::new();
    for name in dispatcher.list_methods() {
        let signature = match dispatcher.method_signature(&name).flatten() {
            Some(sig) => sig.to_string(),
            None => "undef".to_string(),
        };
        let help = dispatcher.method_help(&name);
        rows.push_str(&format!(
            "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>\n",
            escape(name.as_str()),
            escape(signature.as_str()),
            escape(help.as_str()),
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>XML-RPC Service</title></head>\n<body>\n\
         <h1>XML-RPC Service</h1>\n\
         <p>Send XML-RPC requests to <code>POST {path}</code>. The following methods are available:</p>\n\
         <table>\n<tr><th>Method</th><th>Signature</th><th>Help</th></tr>\n{rows}</table>\n\
         </body>\n</html>\n",
        path = escape(rpc_path),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use hashi_dispatch::Dispatcher;

    #[test]
    fn empty_registry_lists_builtins() {
        let dispatcher = Dispatcher::new(Arc::default(), Default::default());
        let html = render(&dispatcher, "/RPC2");
        assert!(html.contains("system.listMethods"));
        assert!(html.contains("array (string)"));
        assert!(html.contains("POST /RPC2"));
    }
}
