//! The monorepo skeleton that ships inside the binary.
//!
//! Every file is compiled in with `include_str!`/`include_bytes!`, so the
//! generated tree is identical on every machine and needs no template
//! directory at runtime. Sources live under `templates/` in this crate;
//! dotfiles are stored without their leading dot and renamed here.
//!
//! Files containing `{{PROJECT_NAME}}` are [`TemplateContent::Parameterized`];
//! everything else is copied byte-for-byte.

use monorepo_core::domain::{TemplateContent, TemplateEntry, TemplateSpec};

use TemplateContent::{Asset, Literal, Parameterized};

macro_rules! asset {
    ($path:literal) => {
        Asset(include_bytes!(concat!("../templates/", $path)))
    };
}

macro_rules! parameterized {
    ($path:literal) => {
        Parameterized(include_str!(concat!("../templates/", $path)))
    };
}

/// FastAPI backend + Next.js frontend monorepo.
pub const MONOREPO_TEMPLATE: TemplateSpec = TemplateSpec::new("fastapi-nextjs", ENTRIES);

const ENTRIES: &[TemplateEntry] = &[
    // ── Root ──────────────────────────────────────────────────────────────────
    TemplateEntry::file(".gitignore", asset!("root/gitignore")),
    TemplateEntry::file("README.md", parameterized!("root/README.md")),
    TemplateEntry::file(".vscode/settings.json", asset!("root/vscode/settings.json")),
    TemplateEntry::script("scripts/dev.sh", asset!("root/scripts/dev.sh")),
    // ── Backend ───────────────────────────────────────────────────────────────
    TemplateEntry::file("backend/pyproject.toml", parameterized!("backend/pyproject.toml")),
    TemplateEntry::file("backend/README.md", parameterized!("backend/README.md")),
    TemplateEntry::file("backend/.env.example", asset!("backend/env.example")),
    TemplateEntry::file("backend/alembic.ini", asset!("backend/alembic.ini")),
    TemplateEntry::file("backend/src/app/__init__.py", Literal("")),
    TemplateEntry::file("backend/src/app/main.py", parameterized!("backend/app/main.py")),
    TemplateEntry::file("backend/src/app/api/__init__.py", Literal("")),
    TemplateEntry::file("backend/src/app/api/routers/__init__.py", Literal("")),
    TemplateEntry::file(
        "backend/src/app/api/routers/profiles.py",
        asset!("backend/app/api/routers/profiles.py"),
    ),
    TemplateEntry::file("backend/src/app/core/__init__.py", Literal("")),
    TemplateEntry::file("backend/src/app/core/config.py", asset!("backend/app/core/config.py")),
    TemplateEntry::file("backend/src/app/database/__init__.py", Literal("")),
    TemplateEntry::file(
        "backend/src/app/database/README.md",
        asset!("backend/app/database/README.md"),
    ),
    TemplateEntry::file(
        "backend/src/app/database/session.py",
        asset!("backend/app/database/session.py"),
    ),
    TemplateEntry::file("backend/src/app/database/models/__init__.py", Literal("")),
    TemplateEntry::file(
        "backend/src/app/database/models/base.py",
        asset!("backend/app/database/models/base.py"),
    ),
    TemplateEntry::file(
        "backend/src/app/database/models/profiles.py",
        asset!("backend/app/database/models/profiles.py"),
    ),
    TemplateEntry::file(
        "backend/src/app/database/alembic/env.py",
        asset!("backend/app/database/alembic/env.py"),
    ),
    TemplateEntry::file(
        "backend/src/app/database/alembic/script.py.mako",
        asset!("backend/app/database/alembic/script.py.mako"),
    ),
    TemplateEntry::dir("backend/src/app/database/alembic/versions"),
    TemplateEntry::file("backend/src/app/storage/__init__.py", Literal("")),
    TemplateEntry::file(
        "backend/src/app/storage/bucket.py",
        asset!("backend/app/storage/bucket.py"),
    ),
    // ── Frontend ──────────────────────────────────────────────────────────────
    TemplateEntry::file("frontend/package.json", parameterized!("frontend/package.json")),
    TemplateEntry::file("frontend/tsconfig.json", asset!("frontend/tsconfig.json")),
    TemplateEntry::file("frontend/next.config.ts", asset!("frontend/next.config.ts")),
    TemplateEntry::file("frontend/postcss.config.mjs", asset!("frontend/postcss.config.mjs")),
    TemplateEntry::file("frontend/.prettierrc", asset!("frontend/prettierrc")),
    TemplateEntry::file("frontend/.eslintrc.json", asset!("frontend/eslintrc.json")),
    TemplateEntry::file("frontend/.env.local.example", asset!("frontend/env.local.example")),
    TemplateEntry::file("frontend/README.md", parameterized!("frontend/README.md")),
    TemplateEntry::file("frontend/src/app/layout.tsx", parameterized!("frontend/app/layout.tsx")),
    TemplateEntry::file("frontend/src/app/page.tsx", parameterized!("frontend/app/page.tsx")),
    TemplateEntry::file("frontend/src/app/globals.css", asset!("frontend/app/globals.css")),
    TemplateEntry::file(
        "frontend/src/app/dashboard/page.tsx",
        asset!("frontend/app/dashboard/page.tsx"),
    ),
    TemplateEntry::file("frontend/src/api/index.ts", asset!("frontend/api/index.ts")),
    TemplateEntry::file(
        "frontend/src/api/profiles/profileApi.ts",
        asset!("frontend/api/profiles/profileApi.ts"),
    ),
    TemplateEntry::file(
        "frontend/src/api/profiles/profileApiTypes.ts",
        asset!("frontend/api/profiles/profileApiTypes.ts"),
    ),
    TemplateEntry::file(
        "frontend/src/components/LoginForm.tsx",
        asset!("frontend/components/LoginForm.tsx"),
    ),
    TemplateEntry::file("frontend/src/hooks/useAuth.ts", asset!("frontend/hooks/useAuth.ts")),
    TemplateEntry::file("frontend/src/lib/supabase.ts", asset!("frontend/lib/supabase.ts")),
    TemplateEntry::file(
        "frontend/src/providers/ReactQueryProvider.tsx",
        asset!("frontend/providers/ReactQueryProvider.tsx"),
    ),
];
