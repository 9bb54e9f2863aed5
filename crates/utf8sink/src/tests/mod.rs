
mod commit_semantics;
