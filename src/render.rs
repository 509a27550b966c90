//! Room description rendering. Pure presentation: the wording here is not
//! part of any contract, only the inputs are.

/// Everything the renderer needs to describe the current location.
pub struct RoomView<'a> {
    /// Label on the room's sign: the repository name at the root, the last
    /// path segment anywhere else.
    pub sign_label: &'a str,
    pub has_dirs: bool,
    pub non_root: bool,
    pub has_files: bool,
}

pub fn describe_room(view: &RoomView<'_>) -> String {
    let mut out = String::new();

    out.push_str(
        "\nYou are standing in a room of plain construction. \
         There is a drop ceiling above you with scattered flourescent lighting.\n\n\
         It smells of stale coffee, but you can find none to drink.\n\n",
    );
    out.push_str(&format!("A sign reads '{}'\n\n", view.sign_label));
    out.push_str("dust motes float through the air.\n");

    if view.has_dirs {
        out.push_str("\nthere is a door marked with a staircase and a down arrow along one wall.\n");
    }
    if view.non_root {
        out.push_str("\nthere is a door marked with a staircase and an up arrow along one wall.\n");
    }
    if view.has_files {
        out.push_str("\nthere are pieces of paper strewn about the floor.\n");
    }

    out
}
