#[cfg(test)]
mod tests {
    use msiforge::bundler::{MsiArch, MsiSettings, PackageSettings, Settings, SettingsBuilder};
    use std::path::Path;
    use uuid::Uuid;

    fn widget_settings(msi: MsiSettings) -> Settings {
        SettingsBuilder::new()
            .build_tree("build/exe")
            .package_settings(PackageSettings {
                product_name: "Widget".into(),
                version: "1.2.3".into(),
                description: "Widget app".into(),
                authors: Some(vec!["Acme Inc. <dev@acme.example>".into()]),
                ..Default::default()
            })
            .msi_settings(msi)
            .target("x86_64-pc-windows-msvc".into())
            .build()
            .expect("settings build")
    }

    #[test]
    fn test_arch_from_target_triple() {
        assert_eq!(
            MsiArch::from_target_triple("x86_64-pc-windows-msvc"),
            MsiArch::X64
        );
        assert_eq!(
            MsiArch::from_target_triple("i686-pc-windows-msvc"),
            MsiArch::X86
        );
        assert_eq!(
            MsiArch::from_target_triple("aarch64-pc-windows-msvc"),
            MsiArch::Arm64
        );
    }

    #[test]
    fn test_arch_program_files_folder() {
        assert_eq!(MsiArch::X64.program_files_folder(), "ProgramFiles64Folder");
        assert_eq!(MsiArch::X86.program_files_folder(), "ProgramFilesFolder");
    }

    #[test]
    fn test_default_target_name() {
        let settings = widget_settings(MsiSettings::default());
        assert_eq!(
            settings.target_path(),
            Path::new("dist").join("Widget-1.2.3-amd64.msi")
        );
    }

    #[test]
    fn test_target_name_without_msi_suffix_gets_platform_tag() {
        let settings = widget_settings(MsiSettings {
            target_name: Some("widget-setup".into()),
            ..Default::default()
        });
        assert_eq!(
            settings.target_path(),
            Path::new("dist").join("widget-setup-amd64.msi")
        );
    }

    #[test]
    fn test_target_name_with_msi_suffix_kept_verbatim() {
        let settings = widget_settings(MsiSettings {
            target_name: Some("WidgetSetup.msi".into()),
            ..Default::default()
        });
        assert_eq!(
            settings.target_path(),
            Path::new("dist").join("WidgetSetup.msi")
        );
    }

    #[test]
    fn test_default_initial_target_dir() {
        let settings = widget_settings(MsiSettings::default());
        assert_eq!(
            settings.initial_target_dir(),
            r"[ProgramFiles64Folder]\Acme Inc.\Widget"
        );
    }

    #[test]
    fn test_manufacturer_prefers_publisher() {
        let settings = widget_settings(MsiSettings {
            publisher: Some("Acme Corporation".into()),
            ..Default::default()
        });
        assert_eq!(settings.manufacturer(), "Acme Corporation");
    }

    #[test]
    fn test_manufacturer_falls_back_to_unknown() {
        let settings = SettingsBuilder::new()
            .build_tree("build/exe")
            .package_settings(PackageSettings {
                product_name: "Widget".into(),
                version: "0.1.0".into(),
                ..Default::default()
            })
            .target("x86_64-pc-windows-msvc".into())
            .build()
            .expect("settings build");
        assert_eq!(settings.manufacturer(), "UNKNOWN");
    }

    #[test]
    fn test_upgrade_code_stable_across_builds() {
        let first = widget_settings(MsiSettings::default());
        let second = widget_settings(MsiSettings::default());
        assert_eq!(first.upgrade_code(), second.upgrade_code());
    }

    #[test]
    fn test_upgrade_code_varies_with_identifier() {
        let default_id = widget_settings(MsiSettings::default());
        let custom_id = widget_settings(MsiSettings {
            identifier: Some("com.acme.widget".into()),
            ..Default::default()
        });
        assert_ne!(default_id.upgrade_code(), custom_id.upgrade_code());
    }

    #[test]
    fn test_product_code_fresh_per_build() {
        let first = widget_settings(MsiSettings::default());
        let second = widget_settings(MsiSettings::default());
        assert_ne!(first.product_code(), second.product_code());
    }

    #[test]
    fn test_explicit_codes_respected() {
        let upgrade = Uuid::parse_str("9a4ed1a6-7c3b-4f5e-9e56-6a2b15a05d7c").expect("guid");
        let product = Uuid::parse_str("3f2504e0-4f89-11d3-9a0c-0305e82c3301").expect("guid");
        let settings = widget_settings(MsiSettings {
            upgrade_code: Some(upgrade),
            product_code: Some(product),
            ..Default::default()
        });
        assert_eq!(settings.upgrade_code(), upgrade);
        assert_eq!(settings.product_code(), product);
    }

    #[test]
    fn test_product_version_truncates_prerelease() {
        let settings = SettingsBuilder::new()
            .build_tree("build/exe")
            .package_settings(PackageSettings {
                product_name: "Widget".into(),
                version: "2.0.1-beta.1+build5".into(),
                ..Default::default()
            })
            .target("x86_64-pc-windows-msvc".into())
            .build()
            .expect("settings build");
        assert_eq!(settings.product_version(), "2.0.1");
    }

    #[test]
    fn test_invalid_version_rejected() {
        let result = SettingsBuilder::new()
            .build_tree("build/exe")
            .package_settings(PackageSettings {
                product_name: "Widget".into(),
                version: "not-a-version".into(),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_package_settings_rejected() {
        let result = SettingsBuilder::new().build_tree("build/exe").build();
        assert!(
            result
                .expect_err("must fail")
                .to_string()
                .contains("package_settings is required")
        );
    }

    #[test]
    fn test_empty_product_name_rejected() {
        let result = SettingsBuilder::new()
            .build_tree("build/exe")
            .package_settings(PackageSettings {
                version: "1.0.0".into(),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod manifest_tests {
    use msiforge::metadata::load_manifest;

    #[test]
    fn test_load_manifest_with_msi_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest_path = dir.path().join("Cargo.toml");
        std::fs::write(
            &manifest_path,
            r#"
[package]
name = "widget"
version = "1.4.0"
description = "A widget"
authors = ["Acme Inc. <dev@acme.example>"]

[package.metadata.msi]
identifier = "com.acme.widget"
publisher = "Acme Inc."
upgrade_code = "9a4ed1a6-7c3b-4f5e-9e56-6a2b15a05d7c"
add_to_path = true
target_name = "widget-setup"
license = "COPYING"
"#,
        )
        .expect("write manifest");

        let manifest = load_manifest(&manifest_path).expect("load");
        assert_eq!(manifest.package.product_name, "widget");
        assert_eq!(manifest.package.version, "1.4.0");
        assert_eq!(manifest.msi.identifier.as_deref(), Some("com.acme.widget"));
        assert_eq!(manifest.msi.publisher.as_deref(), Some("Acme Inc."));
        assert!(manifest.msi.add_to_path);
        assert_eq!(manifest.msi.target_name.as_deref(), Some("widget-setup"));
        // Relative manifest paths resolve next to the manifest.
        assert_eq!(manifest.msi.license, Some(dir.path().join("COPYING")));
        assert_eq!(
            manifest.msi.upgrade_code.map(|u| u.to_string()),
            Some("9a4ed1a6-7c3b-4f5e-9e56-6a2b15a05d7c".into())
        );
    }

    #[test]
    fn test_load_manifest_without_msi_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest_path = dir.path().join("Cargo.toml");
        std::fs::write(
            &manifest_path,
            "[package]\nname = \"widget\"\nversion = \"0.1.0\"\n",
        )
        .expect("write manifest");

        let manifest = load_manifest(&manifest_path).expect("load");
        assert_eq!(manifest.package.product_name, "widget");
        assert!(manifest.msi.upgrade_code.is_none());
        assert!(!manifest.msi.add_to_path);
    }

    #[test]
    fn test_load_manifest_rejects_bad_guid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manifest_path = dir.path().join("Cargo.toml");
        std::fs::write(
            &manifest_path,
            "[package]\nname = \"widget\"\nversion = \"0.1.0\"\n\n[package.metadata.msi]\nupgrade_code = \"not-a-guid\"\n",
        )
        .expect("write manifest");

        assert!(load_manifest(&manifest_path).is_err());
    }
}

#[cfg(test)]
mod rtf_tests {
    use msiforge::bundler::rtf::license_to_rtf;

    #[test]
    fn test_license_conversion_end_to_end() {
        let license = "\
Copyright (c) 2016 Acme Inc.

Permission is hereby granted, free of charge,
to any person obtaining a copy of this software.

            John Doe
            CEO";

        let rtf = license_to_rtf(license.lines());
        assert!(rtf.starts_with("{\\rtf1\\ansi\\ansicpg1252"));
        assert!(rtf.contains("Copyright (c) 2016 Acme Inc."));
        // Wrapped lines reflow into one block.
        assert!(
            rtf.contains("Permission is hereby granted, free of charge, to any person")
        );
        assert!(rtf.contains("\\qc\\f0\\fs22 John Doe\\par"));
        assert!(rtf.contains("\\qc\\f0\\fs22 CEO\\par"));
    }
}
