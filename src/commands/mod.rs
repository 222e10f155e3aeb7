/*!
Command handlers for the CLI

This module provides the command handlers invoked by the CLI entrypoint.
The tool has a single operation:

- `resolve` — resolve a user's transitive group membership and print one
  RADIUS attribute-value pair per group

The handler is intentionally small and wires together the library
components: directory, resolver, and formatter.
*/

pub mod resolve;
