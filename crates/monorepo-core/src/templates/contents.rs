//! Literal template bodies and structured-document builders
//!
//! Placeholders use `{{name}}` and are substituted literally; see
//! [`super::registry::TemplateContext`].

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Workspace root
// ---------------------------------------------------------------------------

pub fn turbo_json() -> Value {
    json!({
        "$schema": "https://turbo.build/schema.json",
        "ui": "tui",
        "tasks": {
            "build": {
                "dependsOn": ["^build"],
                "inputs": ["$TURBO_DEFAULT$", ".env*"],
                "outputs": [".next/**", "!.next/cache/**", "dist/**"]
            },
            "check-types": {
                "dependsOn": ["^check-types"]
            },
            "dev": {
                "cache": false,
                "persistent": true
            },
            "lint": {
                "dependsOn": ["^lint"]
            },
            "test": {
                "cache": false,
                "persistent": true
            }
        }
    })
}

pub fn prettierrc() -> Value {
    json!({
        "singleQuote": true,
        "trailingComma": "es5",
        "arrowParens": "always"
    })
}

pub fn vscode_settings() -> Value {
    json!({
        "eslint.workingDirectories": [{ "mode": "auto" }],
        "typescript.tsdk": "./node_modules/typescript/lib"
    })
}

pub fn vscode_extensions() -> Value {
    json!({
        "recommendations": [
            "dbaeumer.vscode-eslint",
            "esbenp.prettier-vscode",
            "prisma.prisma"
        ]
    })
}

pub const PNPM_WORKSPACE_YAML: &str = r#"
packages:
  - "apps/*"
  - "packages/*"
"#;

pub const PRETTIER_IGNORE: &str = "pnpm-lock.yaml";

pub const GITIGNORE: &str = r#"
# Dependencies
node_modules

# Builds
.next/
dist/

# Misc
.DS_Store
*.pem

# Debug
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Local env files
.env*.local

# Turbo
.turbo
"#;

pub const README_MD: &str = r#"
# {{workspace_name}}

A Turbo + pnpm monorepo generated by turbo-ts-cli.

## Getting Started

1. Start the containers and every app:
   ```
   pnpm dev
   ```
2. Once the database container is up, create the first migration:
   ```
   pnpm db:init
   ```
3. Open the web app at http://localhost:3000

The development database is `{{resource_name}}`.

## Useful Commands

- `pnpm dev`: start the development environment
- `pnpm build`: build every package and app
- `pnpm check-types`: type-check every package and app
- `pnpm db <prisma command>`: run Prisma inside `packages/db`
- `pnpm db:reset`: recreate the database container and re-run migrations

## Project Structure

- `apps/web`: Next.js application
- `apps/worker`: Node.js background worker
- `apps/api`: NestJS API
- `packages/db`: Prisma client and schema
- `packages/queue`: BullMQ queues and job types
- `packages/types`: shared TypeScript types
- `packages/eslint-config`, `packages/typescript-config`: shared tooling config
- `packages/docker`: Postgres and Redis for local development

## Adding Apps or Packages

```
turbo-ts-cli <name> --next | --node | --nest | --package
```
"#;

// ---------------------------------------------------------------------------
// Shared config packages
// ---------------------------------------------------------------------------

pub fn typescript_base_json() -> Value {
    json!({
        "$schema": "https://json.schemastore.org/tsconfig",
        "extends": "@tsconfig/node20/tsconfig.json",
        "compilerOptions": {
            "module": "ESNext",
            "moduleResolution": "Bundler",
            "strict": true,
            "esModuleInterop": true,
            "forceConsistentCasingInFileNames": true
        }
    })
}

pub const ESLINT_CONFIG_INDEX_JS: &str = r#"
import globals from 'globals';
import pluginJs from '@eslint/js';
import tseslint from 'typescript-eslint';

export default [
  { files: ['**/*.{js,mjs,cjs,ts}'] },
  { languageOptions: { globals: globals.node } },
  pluginJs.configs.recommended,
  ...tseslint.configs.recommended,
];
"#;

pub const DOCKER_COMPOSE_YML: &str = r#"
services:
  postgres:
    image: postgres:16
    environment:
      POSTGRES_USER: postgres
      POSTGRES_PASSWORD: postgres
      POSTGRES_DB: {{resource_name}}
    ports:
      - "5432:5432"
    volumes:
      - /var/lib/postgresql/data

  redis:
    image: redis:6.2-alpine
    ports:
      - "6379:6379"
"#;

// ---------------------------------------------------------------------------
// tsup-built members
// ---------------------------------------------------------------------------

pub const ESLINT_CONFIG_JS: &str = r#"
import eslintConfig from '@packages/eslint-config';

export default [...eslintConfig, { ignores: ['dist/', '.next/'] }];
"#;

pub fn member_tsconfig_json() -> Value {
    json!({
        "extends": "@packages/typescript-config/base.json",
        "compilerOptions": {
            "incremental": true,
            "outDir": "./dist",
            "emitDecoratorMetadata": true,
            "experimentalDecorators": true,
            "skipLibCheck": true
        },
        "include": ["src/**/*.ts"],
        "exclude": ["node_modules", "test", "dist"]
    })
}

pub const TSUP_CONFIG_INDEX_TS: &str = r#"
import { defineConfig } from 'tsup';

export default defineConfig({
  entry: ['src/index.ts'],
  format: ['esm'],
  clean: true,
  sourcemap: true,
});
"#;

pub const TSUP_CONFIG_MAIN_TS: &str = r#"
import { defineConfig } from 'tsup';

export default defineConfig({
  entry: ['src/main.ts'],
  format: ['esm'],
  clean: true,
  sourcemap: true,
});
"#;

pub const DEFAULT_ENTRY_TS: &str = r#"
console.log('Welcome to {{member_name}}!');
"#;

pub const DATABASE_ENV: &str = r#"
DATABASE_URL={{database_url}}
"#;

// ---------------------------------------------------------------------------
// Helper library packages
// ---------------------------------------------------------------------------

pub const PRISMA_SCHEMA: &str = r#"
generator client {
  provider = "prisma-client-js"
}

datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

model User {
  id        String   @id
  username  String   @unique
  name      String
  posts     Post[]
  createdAt DateTime @default(now())
  updatedAt DateTime @updatedAt
}

model Post {
  id        String   @id
  content   String
  userId    String
  user      User     @relation(fields: [userId], references: [id])
  createdAt DateTime @default(now())
  updatedAt DateTime @updatedAt
}
"#;

pub const DB_INDEX_TS: &str = r#"
import { PrismaClient } from '@prisma/client';
import { customAlphabet } from 'nanoid';

export * from '@prisma/client';

const globalForPrisma = globalThis as unknown as { prisma?: PrismaClient };

export const db = globalForPrisma.prisma ?? new PrismaClient();

if (process.env.NODE_ENV !== 'production') {
  globalForPrisma.prisma = db;
}

const alphabet = '0123456789abcdefghijklmnopqrstuvwxyz';

/** 12-character identifier used for every primary key */
export const genId = customAlphabet(alphabet, 12);
"#;

pub const QUEUE_INDEX_TS: &str = r#"
import { Queue, Worker, type Processor } from 'bullmq';
import { Redis } from 'ioredis';

export const QUEUE_NAME = '{{workspace_name}}-jobs';

export enum JobType {
  GeneratePosts = 'generate-posts',
}

export type JobData = {
  [JobType.GeneratePosts]: { count: number };
};

export const connection = new Redis(process.env.REDIS_URL ?? 'redis://localhost:6379', {
  maxRetriesPerRequest: null,
});

export const queue = new Queue(QUEUE_NAME, { connection });

export const enqueue = <T extends JobType>(type: T, data: JobData[T]) =>
  queue.add(type, data);

export const createWorker = (processor: Processor) =>
  new Worker(QUEUE_NAME, processor, { connection });
"#;

pub const TYPES_INDEX_TS: &str = r#"
export type Id = string;

export interface UserSummary {
  id: Id;
  username: string;
  name: string;
}

export interface PostSummary {
  id: Id;
  content: string;
  createdAt: Date;
  user: UserSummary;
}

export interface Product {
  id: Id;
  name: string;
  price: number;
  description?: string;
}

export type CreateProductRequest = Omit<Product, 'id'>;
"#;

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

pub const WORKER_INDEX_TS: &str = r#"
import { createWorker } from '@packages/queue';

console.log('Starting {{member_name}}...');

const worker = createWorker(async (job) => {
  console.log(`Processing ${job.name} (${job.id})`);
});

worker.on('failed', (job, err) => {
  console.error(`Job ${job?.id} failed:`, err);
});
"#;

pub const NEST_MAIN_TS: &str = r#"
import 'reflect-metadata';
import { NestFactory } from '@nestjs/core';
import { AppModule } from './app.module';

async function bootstrap() {
  const app = await NestFactory.create(AppModule);
  await app.listen(4000);
  console.log('{{member_name}} is running on http://localhost:4000');
}
bootstrap();
"#;

pub const NEST_APP_MODULE_TS: &str = r#"
import { Module } from '@nestjs/common';

@Module({
  imports: [],
  controllers: [],
  providers: [],
})
export class AppModule {}
"#;

pub const NEXT_CONFIG_TS: &str = r#"
import type { NextConfig } from 'next';

const nextConfig: NextConfig = {
  transpilePackages: ['@packages/db', '@packages/queue', '@packages/types'],
};

export default nextConfig;
"#;

pub fn next_tsconfig_json() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2017",
            "lib": ["dom", "dom.iterable", "esnext"],
            "allowJs": true,
            "skipLibCheck": true,
            "strict": true,
            "noEmit": true,
            "esModuleInterop": true,
            "module": "esnext",
            "moduleResolution": "bundler",
            "resolveJsonModule": true,
            "isolatedModules": true,
            "jsx": "preserve",
            "incremental": true,
            "plugins": [{ "name": "next" }],
            "paths": { "@/*": ["./src/*"] }
        },
        "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx", ".next/types/**/*.ts"],
        "exclude": ["node_modules"]
    })
}

pub const NEXT_LAYOUT_TSX: &str = r#"
import type { Metadata } from 'next';

export const metadata: Metadata = {
  title: '{{workspace_name}}',
};

export default function RootLayout({ children }: { children: React.ReactNode }) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#;

pub const NEXT_PAGE_TSX: &str = r#"
import { db } from '@packages/db';

export const dynamic = 'force-dynamic';

export default async function Home() {
  const posts = await db.post.findMany({
    include: { user: true },
    orderBy: { createdAt: 'desc' },
    take: 20,
  });

  return (
    <main>
      <h1>{{workspace_name}}</h1>
      <ul>
        {posts.map((post) => (
          <li key={post.id}>
            <strong>{post.user.name}</strong>: {post.content}
          </li>
        ))}
      </ul>
    </main>
  );
}
"#;
