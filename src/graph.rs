//! Graphviz rendering of the contact network: the identity in the centre and
//! one edge per contact, labelled with the score.

use crate::mutual::ContactScore;

const BASE_NODE_WIDTH: f64 = 0.5;
const WIDTH_PER_SCORE: f64 = 0.1;


/// Renders `contacts` as an undirected DOT graph. Node width grows with score;
/// the identity node is as wide as the top contact.
pub fn render_dot(self_name: &str, contacts: &[ContactScore]) -> String {
    let top_score = contacts.first().map(|c| c.score).unwrap_or_default();

    let mut dot = String::from("graph contacts {\n");
    dot.push_str("  layout=neato;\n");
    dot.push_str("  node [shape=circle, style=filled, fillcolor=\"#0000ff4d\"];\n");
    dot.push_str("  edge [color=\"#0000ff4d\"];\n");

    dot.push_str(&format!(
        "  \"self\" [label=\"{}\", width={:.2}];\n",
        escape(self_name),
        node_width(top_score)
    ));

    for contact in contacts {
        let id = escape(&contact.contact);

        dot.push_str(&format!(
            "  \"{id}\" [label=\"{}\", width={:.2}];\n",
            escape(&contact.display_name),
            node_width(contact.score)
        ));
        dot.push_str(&format!(
            "  \"self\" -- \"{id}\" [label=\"{:.2}\"];\n",
            contact.score
        ));
    }

    dot.push_str("}\n");
    dot
}

fn node_width(score: f64) -> f64 {
    BASE_NODE_WIDTH + score * WIDTH_PER_SCORE
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
