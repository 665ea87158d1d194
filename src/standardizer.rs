use crate::tree::{Label, Node};

/// Rewrites a tree into its standard form.
///
/// Children are standardized first; a node whose label and shape match one
/// of the eight rules is rewritten, every other node passes through
/// untouched, so the rewrite is total. The standard form uses only
/// `gamma`, `lambda`, `->`, `tau`, `aug`, the operators and tagged leaves.
pub fn standardize(node: Node) -> Node {
    let Node { label, children } = node;
    let children: Vec<Node> = children.into_iter().map(standardize).collect();

    match label {
        Label::Let => rewrite_let(children),
        Label::Where => rewrite_where(children),
        Label::FunctionForm => rewrite_function_form(children),
        Label::Gamma if children.len() > 2 => rewrite_gamma(children),
        Label::Within => rewrite_within(children),
        Label::At => rewrite_at(children),
        Label::And => rewrite_and(children),
        Label::Rec => rewrite_rec(children),
        label => Node::branch(label, children),
    }
}

/// Folds binders around a body, innermost binder last.
fn curry(params: Vec<Node>, body: Node) -> Node {
    params.into_iter().rev().fold(body, |body, param| {
        Node::branch(Label::Lambda, vec![param, body])
    })
}

/// Puts a pair of children that did not match a rule back under its label.
fn rebuild(label: Label, parts: Result<[Node; 2], Vec<Node>>) -> Node {
    match parts {
        Ok(pair) => Node::branch(label, pair.into()),
        Err(children) => Node::branch(label, children),
    }
}

/// let x = E1 in E2  =>  gamma(lambda(x, E2), E1)
fn rewrite_let(children: Vec<Node>) -> Node {
    match <[Node; 2]>::try_from(children) {
        Ok([binding, body]) if binding.label == Label::Equal => {
            match <[Node; 2]>::try_from(binding.children) {
                Ok([name, value]) => Node::branch(Label::Gamma, vec![
                    Node::branch(Label::Lambda, vec![name, body]),
                    value,
                ]),
                Err(parts) => Node::branch(Label::Let, vec![
                    Node::branch(Label::Equal, parts),
                    body,
                ]),
            }
        },
        Ok(children) => Node::branch(Label::Let, children.into()),
        Err(children) => Node::branch(Label::Let, children),
    }
}

/// E1 where x = E2  =>  gamma(lambda(x, E1), E2)
fn rewrite_where(children: Vec<Node>) -> Node {
    match <[Node; 2]>::try_from(children) {
        Ok([body, binding]) if binding.label == Label::Equal => {
            match <[Node; 2]>::try_from(binding.children) {
                Ok([name, value]) => Node::branch(Label::Gamma, vec![
                    Node::branch(Label::Lambda, vec![name, body]),
                    value,
                ]),
                Err(parts) => Node::branch(Label::Where, vec![
                    body,
                    Node::branch(Label::Equal, parts),
                ]),
            }
        },
        Ok(children) => Node::branch(Label::Where, children.into()),
        Err(children) => Node::branch(Label::Where, children),
    }
}

/// f x1 ... xn = E  =>  =(f, lambda(x1, ... lambda(xn, E)))
fn rewrite_function_form(mut children: Vec<Node>) -> Node {
    match children.pop() {
        Some(body) if children.len() >= 2 => {
            let name = children.remove(0);
            Node::branch(Label::Equal, vec![name, curry(children, body)])
        },
        Some(body) => {
            children.push(body);
            Node::branch(Label::FunctionForm, children)
        },
        None => Node::branch(Label::FunctionForm, children),
    }
}

/// gamma(E1, E2, ..., Ek) with k > 2  =>  gamma(E1, lambda(E2, ... lambda(Ek-1, Ek)))
fn rewrite_gamma(mut children: Vec<Node>) -> Node {
    match children.pop() {
        Some(rand) if children.len() >= 2 => {
            let rator = children.remove(0);
            Node::branch(Label::Gamma, vec![rator, curry(children, rand)])
        },
        Some(rand) => {
            children.push(rand);
            Node::branch(Label::Gamma, children)
        },
        None => Node::branch(Label::Gamma, children),
    }
}

/// within(=(x1, E1), =(x2, E2))  =>  =(x2, gamma(lambda(x1, E2), E1))
fn rewrite_within(children: Vec<Node>) -> Node {
    match <[Node; 2]>::try_from(children) {
        Ok([outer, inner]) if outer.label == Label::Equal && inner.label == Label::Equal => {
            match (
                <[Node; 2]>::try_from(outer.children),
                <[Node; 2]>::try_from(inner.children),
            ) {
                (Ok([x1, e1]), Ok([x2, e2])) => Node::branch(Label::Equal, vec![
                    x2,
                    Node::branch(Label::Gamma, vec![
                        Node::branch(Label::Lambda, vec![x1, e2]),
                        e1,
                    ]),
                ]),
                (outer_parts, inner_parts) => Node::branch(Label::Within, vec![
                    rebuild(Label::Equal, outer_parts),
                    rebuild(Label::Equal, inner_parts),
                ]),
            }
        },
        Ok(children) => Node::branch(Label::Within, children.into()),
        Err(children) => Node::branch(Label::Within, children),
    }
}

/// @(E1, N, E2)  =>  gamma(gamma(N, E1), E2)
fn rewrite_at(children: Vec<Node>) -> Node {
    match <[Node; 3]>::try_from(children) {
        Ok([e1, name, e2]) => Node::branch(Label::Gamma, vec![
            Node::branch(Label::Gamma, vec![name, e1]),
            e2,
        ]),
        Err(children) => Node::branch(Label::At, children),
    }
}

/// and(=(x1, E1), ..., =(xn, En))  =>  =( ,(x1, ..., xn), tau(E1, ..., En) )
fn rewrite_and(children: Vec<Node>) -> Node {
    let all_bindings = children
        .iter()
        .all(|child| child.label == Label::Equal && child.children.len() == 2);

    if !all_bindings {
        return Node::branch(Label::And, children);
    }

    let mut names = Vec::with_capacity(children.len());
    let mut values = Vec::with_capacity(children.len());

    for binding in children {
        let mut parts = binding.children.into_iter();
        if let (Some(name), Some(value)) = (parts.next(), parts.next()) {
            names.push(name);
            values.push(value);
        }
    }

    Node::branch(Label::Equal, vec![
        Node::branch(Label::Comma, names),
        Node::branch(Label::Tau, values),
    ])
}

/// rec x = E  =>  =(x, gamma(Y*, lambda(x, E)))
///
/// The bound name ends up both as the left side of the `=` and as the
/// binder of the inner lambda.
fn rewrite_rec(children: Vec<Node>) -> Node {
    match <[Node; 1]>::try_from(children) {
        Ok([binding]) if binding.label == Label::Equal => {
            match <[Node; 2]>::try_from(binding.children) {
                Ok([name, body]) => {
                    let lambda = Node::branch(Label::Lambda, vec![name.clone(), body]);
                    Node::branch(Label::Equal, vec![
                        name,
                        Node::branch(Label::Gamma, vec![Node::leaf(Label::YStar), lambda]),
                    ])
                },
                Err(parts) => Node::branch(Label::Rec, vec![
                    Node::branch(Label::Equal, parts),
                ]),
            }
        },
        Ok(children) => Node::branch(Label::Rec, children.into()),
        Err(children) => Node::branch(Label::Rec, children),
    }
}
