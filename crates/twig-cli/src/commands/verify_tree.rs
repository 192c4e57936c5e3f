use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;
use twig_merkle::{build_from_tree, build_from_work_tree, MerkleNode};

use super::open_repo;

#[derive(Args)]
pub struct VerifyTreeArgs {
    /// Verify the current working tree instead of a stored tree
    #[arg(long = "work-tree", conflicts_with = "tree")]
    work_tree: bool,

    /// Digest of a stored tree object to verify
    tree: Option<String>,
}

pub fn run(args: &VerifyTreeArgs) -> Result<i32> {
    let repo = open_repo()?;

    let root = if args.work_tree {
        println!("Building Merkle tree from working tree...");
        build_from_work_tree(repo.work_tree())?
    } else {
        let digest = match &args.tree {
            Some(digest) => digest,
            None => bail!("expected --work-tree or a tree digest"),
        };
        let oid = ObjectId::from_hex(digest)?;
        println!("Building Merkle tree from tree object {oid}...");
        let store = repo.store();
        build_from_tree(&store, &oid)?
    };

    println!();
    print_node(&root, 0);
    println!();
    println!("Merkle root: {}", root.digest());

    if root.verify(&root.digest()) {
        println!("Tree integrity: OK");
        Ok(0)
    } else {
        println!("Tree integrity: FAILED");
        Ok(1)
    }
}

fn print_node(node: &MerkleNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let path = if node.path().is_empty() {
        "."
    } else {
        node.path()
    };
    if node.is_leaf() {
        println!("{indent}{path} [{}]", node.digest().short());
    } else {
        println!("{indent}{path}/ [{}]", node.digest().short());
        for child in node.children() {
            print_node(child, depth + 1);
        }
    }
}
