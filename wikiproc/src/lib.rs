mod derive;

synstructure::decl_derive!([WriteUrl, attributes(wp)] => derive::derive_write_url);
